//! Error types for rawpix-core operations.
//!
//! This module provides the error handling for the pixel format value
//! space. The set of recoverable failures is deliberately small: every
//! variant describes a precondition on a format value that a caller can
//! query up front.
//!
//! Buffer-size mismatches at image construction are *not* represented
//! here. Passing a too-small buffer for a declared layout is a caller
//! bug, reported as a panic at the call site (see the `# Panics`
//! sections on the [`Image`](crate::image::Image) and
//! [`ImageView`](crate::view::ImageView) constructors).
//!
//! # Usage
//!
//! ```rust
//! use rawpix_core::{Error, PixelFormat};
//!
//! // Wrapping a backend code that collides with the tag bit fails.
//! let err = PixelFormat::wrap(0xdeadbeef).unwrap_err();
//! assert!(matches!(err, Error::FormatCodeTooWide { .. }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::format`] - wrap/unwrap and pixel-size lookup

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when working with pixel format values.
///
/// All variants are precondition violations on a single format value;
/// none of them is transient or environment-dependent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A backend format code passed to `wrap()` already has the tag bit
    /// set, so tagging it would lose information.
    #[error("can't wrap format code {code:#x}: the highest bit is expected to be unset")]
    FormatCodeTooWide {
        /// The rejected backend format code
        code: u32,
    },

    /// `unwrap()` was called on a value that is not tagged as
    /// implementation-specific.
    #[error("can't unwrap format {value:#x}: the highest bit is expected to be set")]
    NotImplementationSpecific {
        /// The raw format value
        value: u32,
    },

    /// Pixel size was requested for an implementation-specific format.
    ///
    /// The size of a wrapped backend format is not derivable without
    /// backend context; callers on that path supply the pixel size
    /// explicitly at image construction.
    #[error("can't determine pixel size of implementation-specific format {format:#x}")]
    ImplementationSpecificPixelSize {
        /// The raw (tagged) format value
        format: u32,
    },

    /// An untagged value that does not name any defined format.
    #[error("unknown pixel format value {value:#x}")]
    UnknownFormat {
        /// The raw format value
        value: u32,
    },
}

impl Error {
    /// Returns `true` if this error came from wrap/unwrap bit misuse.
    #[inline]
    pub fn is_tag_error(&self) -> bool {
        matches!(
            self,
            Self::FormatCodeTooWide { .. } | Self::NotImplementationSpecific { .. }
        )
    }

    /// Returns `true` if this error came from a pixel-size lookup.
    #[inline]
    pub fn is_size_error(&self) -> bool {
        matches!(
            self,
            Self::ImplementationSpecificPixelSize { .. } | Self::UnknownFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_hex_values() {
        let err = Error::FormatCodeTooWide { code: 0xdeadbeef };
        assert!(err.to_string().contains("0xdeadbeef"));
        assert!(err.is_tag_error());

        let err = Error::NotImplementationSpecific { value: 0xdead };
        assert!(err.to_string().contains("0xdead"));
        assert!(err.is_tag_error());
        assert!(!err.is_size_error());
    }

    #[test]
    fn test_size_errors() {
        let err = Error::ImplementationSpecificPixelSize { format: 0x8000_dead };
        assert!(err.is_size_error());
        assert!(!err.is_tag_error());

        let err = Error::UnknownFormat { value: 0 };
        assert!(err.is_size_error());
    }
}
