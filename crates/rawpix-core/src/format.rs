//! Pixel format value space.
//!
//! This module defines the portable format vocabulary and the bit-packed
//! escape hatch for backend-native format codes.
//!
//! # Overview
//!
//! - [`PixelFormat`] - Uncompressed pixel format tag
//! - [`CompressedPixelFormat`] - Block-compressed pixel format tag
//! - [`FormatBridge`] - Contract implemented by backend modules that map
//!   the portable vocabulary to their native identifiers
//!
//! Both format types are opaque 32-bit tags whose value range is split in
//! two by the highest bit:
//!
//! ```text
//! bit 31 clear: defined value, indexes the fixed portable vocabulary
//! bit 31 set:   implementation-specific, low 31 bits = backend code
//! ```
//!
//! A defined value never has the tag bit set; an implementation-specific
//! value always does. This lets a single integer-sized value carry either
//! the small closed portable vocabulary or an arbitrary backend format
//! identifier, with O(1) discrimination and no extra storage.
//!
//! # Usage
//!
//! ```rust
//! use rawpix_core::PixelFormat;
//!
//! // A defined format knows its pixel size.
//! assert_eq!(PixelFormat::RGB8Unorm.pixel_size().unwrap(), 3);
//!
//! // A backend-native identifier is embedded losslessly.
//! let gl_rgba = PixelFormat::wrap(0x1908).unwrap();
//! assert!(gl_rgba.is_implementation_specific());
//! assert_eq!(gl_rgba.unwrap().unwrap(), 0x1908);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::error::Error`] - wrap/unwrap and lookup failures
//!
//! # Used By
//!
//! - [`crate::image`] - pixel size resolution at construction
//! - [`crate::view`] - pixel size resolution at construction

use crate::{Error, Result};
use std::fmt;

/// Tag bit marking a format value as implementation-specific.
const IMPLEMENTATION_SPECIFIC: u32 = 0x8000_0000;

/// One row of the portable format vocabulary.
struct FormatDesc {
    name: &'static str,
    size: u32,
}

/// The portable vocabulary, ordered by tag value. The first entry is tag
/// value 1; tag value 0 is reserved as "undefined".
static PIXEL_FORMATS: [FormatDesc; 48] = [
    FormatDesc { name: "R8Unorm", size: 1 },
    FormatDesc { name: "RG8Unorm", size: 2 },
    FormatDesc { name: "RGB8Unorm", size: 3 },
    FormatDesc { name: "RGBA8Unorm", size: 4 },
    FormatDesc { name: "R8Snorm", size: 1 },
    FormatDesc { name: "RG8Snorm", size: 2 },
    FormatDesc { name: "RGB8Snorm", size: 3 },
    FormatDesc { name: "RGBA8Snorm", size: 4 },
    FormatDesc { name: "R8UI", size: 1 },
    FormatDesc { name: "RG8UI", size: 2 },
    FormatDesc { name: "RGB8UI", size: 3 },
    FormatDesc { name: "RGBA8UI", size: 4 },
    FormatDesc { name: "R8I", size: 1 },
    FormatDesc { name: "RG8I", size: 2 },
    FormatDesc { name: "RGB8I", size: 3 },
    FormatDesc { name: "RGBA8I", size: 4 },
    FormatDesc { name: "R16Unorm", size: 2 },
    FormatDesc { name: "RG16Unorm", size: 4 },
    FormatDesc { name: "RGB16Unorm", size: 6 },
    FormatDesc { name: "RGBA16Unorm", size: 8 },
    FormatDesc { name: "R16Snorm", size: 2 },
    FormatDesc { name: "RG16Snorm", size: 4 },
    FormatDesc { name: "RGB16Snorm", size: 6 },
    FormatDesc { name: "RGBA16Snorm", size: 8 },
    FormatDesc { name: "R16UI", size: 2 },
    FormatDesc { name: "RG16UI", size: 4 },
    FormatDesc { name: "RGB16UI", size: 6 },
    FormatDesc { name: "RGBA16UI", size: 8 },
    FormatDesc { name: "R16I", size: 2 },
    FormatDesc { name: "RG16I", size: 4 },
    FormatDesc { name: "RGB16I", size: 6 },
    FormatDesc { name: "RGBA16I", size: 8 },
    FormatDesc { name: "R32UI", size: 4 },
    FormatDesc { name: "RG32UI", size: 8 },
    FormatDesc { name: "RGB32UI", size: 12 },
    FormatDesc { name: "RGBA32UI", size: 16 },
    FormatDesc { name: "R32I", size: 4 },
    FormatDesc { name: "RG32I", size: 8 },
    FormatDesc { name: "RGB32I", size: 12 },
    FormatDesc { name: "RGBA32I", size: 16 },
    FormatDesc { name: "R16F", size: 2 },
    FormatDesc { name: "RG16F", size: 4 },
    FormatDesc { name: "RGB16F", size: 6 },
    FormatDesc { name: "RGBA16F", size: 8 },
    FormatDesc { name: "R32F", size: 4 },
    FormatDesc { name: "RG32F", size: 8 },
    FormatDesc { name: "RGB32F", size: 12 },
    FormatDesc { name: "RGBA32F", size: 16 },
];

/// The block-compressed vocabulary, ordered by tag value.
static COMPRESSED_PIXEL_FORMATS: [&str; 4] = [
    "Bc1RGBUnorm",
    "Bc1RGBAUnorm",
    "Bc2RGBAUnorm",
    "Bc3RGBAUnorm",
];

/// Format of uncompressed pixel data.
///
/// Carries either a *defined* value from the portable vocabulary or a
/// *wrapped* implementation-specific backend format code, distinguished
/// by [`is_implementation_specific()`](Self::is_implementation_specific).
///
/// Defined values are exposed as associated constants
/// (`PixelFormat::RGBA8Unorm` and so on); backend codes enter via
/// [`wrap()`](Self::wrap) and leave via [`unwrap()`](Self::unwrap).
/// Values are never mutated; a new value replaces the old one.
///
/// # Example
///
/// ```rust
/// use rawpix_core::PixelFormat;
///
/// let wrapped = PixelFormat::wrap(0xdead).unwrap();
/// assert_eq!(wrapped.to_raw(), 0x8000_dead);
/// assert_eq!(wrapped.unwrap().unwrap(), 0xdead);
/// assert_eq!(format!("{wrapped:?}"), "PixelFormat::ImplementationSpecific(0xdead)");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PixelFormat(u32);

#[allow(non_upper_case_globals)]
impl PixelFormat {
    /// 8-bit single-channel unsigned normalized.
    pub const R8Unorm: Self = Self(1);
    /// 8-bit two-channel unsigned normalized.
    pub const RG8Unorm: Self = Self(2);
    /// 8-bit three-channel unsigned normalized.
    pub const RGB8Unorm: Self = Self(3);
    /// 8-bit four-channel unsigned normalized.
    pub const RGBA8Unorm: Self = Self(4);
    /// 8-bit single-channel signed normalized.
    pub const R8Snorm: Self = Self(5);
    /// 8-bit two-channel signed normalized.
    pub const RG8Snorm: Self = Self(6);
    /// 8-bit three-channel signed normalized.
    pub const RGB8Snorm: Self = Self(7);
    /// 8-bit four-channel signed normalized.
    pub const RGBA8Snorm: Self = Self(8);
    /// 8-bit single-channel unsigned integer.
    pub const R8UI: Self = Self(9);
    /// 8-bit two-channel unsigned integer.
    pub const RG8UI: Self = Self(10);
    /// 8-bit three-channel unsigned integer.
    pub const RGB8UI: Self = Self(11);
    /// 8-bit four-channel unsigned integer.
    pub const RGBA8UI: Self = Self(12);
    /// 8-bit single-channel signed integer.
    pub const R8I: Self = Self(13);
    /// 8-bit two-channel signed integer.
    pub const RG8I: Self = Self(14);
    /// 8-bit three-channel signed integer.
    pub const RGB8I: Self = Self(15);
    /// 8-bit four-channel signed integer.
    pub const RGBA8I: Self = Self(16);
    /// 16-bit single-channel unsigned normalized.
    pub const R16Unorm: Self = Self(17);
    /// 16-bit two-channel unsigned normalized.
    pub const RG16Unorm: Self = Self(18);
    /// 16-bit three-channel unsigned normalized.
    pub const RGB16Unorm: Self = Self(19);
    /// 16-bit four-channel unsigned normalized.
    pub const RGBA16Unorm: Self = Self(20);
    /// 16-bit single-channel signed normalized.
    pub const R16Snorm: Self = Self(21);
    /// 16-bit two-channel signed normalized.
    pub const RG16Snorm: Self = Self(22);
    /// 16-bit three-channel signed normalized.
    pub const RGB16Snorm: Self = Self(23);
    /// 16-bit four-channel signed normalized.
    pub const RGBA16Snorm: Self = Self(24);
    /// 16-bit single-channel unsigned integer.
    pub const R16UI: Self = Self(25);
    /// 16-bit two-channel unsigned integer.
    pub const RG16UI: Self = Self(26);
    /// 16-bit three-channel unsigned integer.
    pub const RGB16UI: Self = Self(27);
    /// 16-bit four-channel unsigned integer.
    pub const RGBA16UI: Self = Self(28);
    /// 16-bit single-channel signed integer.
    pub const R16I: Self = Self(29);
    /// 16-bit two-channel signed integer.
    pub const RG16I: Self = Self(30);
    /// 16-bit three-channel signed integer.
    pub const RGB16I: Self = Self(31);
    /// 16-bit four-channel signed integer.
    pub const RGBA16I: Self = Self(32);
    /// 32-bit single-channel unsigned integer.
    pub const R32UI: Self = Self(33);
    /// 32-bit two-channel unsigned integer.
    pub const RG32UI: Self = Self(34);
    /// 32-bit three-channel unsigned integer.
    pub const RGB32UI: Self = Self(35);
    /// 32-bit four-channel unsigned integer.
    pub const RGBA32UI: Self = Self(36);
    /// 32-bit single-channel signed integer.
    pub const R32I: Self = Self(37);
    /// 32-bit two-channel signed integer.
    pub const RG32I: Self = Self(38);
    /// 32-bit three-channel signed integer.
    pub const RGB32I: Self = Self(39);
    /// 32-bit four-channel signed integer.
    pub const RGBA32I: Self = Self(40);
    /// 16-bit single-channel half-float.
    pub const R16F: Self = Self(41);
    /// 16-bit two-channel half-float.
    pub const RG16F: Self = Self(42);
    /// 16-bit three-channel half-float.
    pub const RGB16F: Self = Self(43);
    /// 16-bit four-channel half-float.
    pub const RGBA16F: Self = Self(44);
    /// 32-bit single-channel float.
    pub const R32F: Self = Self(45);
    /// 32-bit two-channel float.
    pub const RG32F: Self = Self(46);
    /// 32-bit three-channel float.
    pub const RGB32F: Self = Self(47);
    /// 32-bit four-channel float.
    pub const RGBA32F: Self = Self(48);
}

impl PixelFormat {
    /// Embeds an implementation-specific backend format code.
    ///
    /// The returned value has the tag bit set and the low 31 bits equal
    /// to `code`.
    ///
    /// # Errors
    ///
    /// [`Error::FormatCodeTooWide`] if `code` has its highest bit set;
    /// tagging such a code would lose information.
    #[inline]
    pub fn wrap(code: u32) -> Result<Self> {
        if code & IMPLEMENTATION_SPECIFIC != 0 {
            return Err(Error::FormatCodeTooWide { code });
        }
        Ok(Self(IMPLEMENTATION_SPECIFIC | code))
    }

    /// Extracts the backend format code out of an implementation-specific
    /// value.
    ///
    /// # Errors
    ///
    /// [`Error::NotImplementationSpecific`] if the tag bit is not set.
    #[inline]
    pub fn unwrap(self) -> Result<u32> {
        if !self.is_implementation_specific() {
            return Err(Error::NotImplementationSpecific { value: self.0 });
        }
        Ok(self.0 & !IMPLEMENTATION_SPECIFIC)
    }

    /// Whether this value carries a wrapped backend format code.
    #[inline]
    pub const fn is_implementation_specific(self) -> bool {
        self.0 & IMPLEMENTATION_SPECIFIC != 0
    }

    /// Size of a pixel in this format, in bytes.
    ///
    /// # Errors
    ///
    /// [`Error::ImplementationSpecificPixelSize`] for wrapped values (the
    /// size is not derivable without backend context; supply it
    /// explicitly when constructing an image on that path), and
    /// [`Error::UnknownFormat`] for untagged values outside the defined
    /// vocabulary.
    pub fn pixel_size(self) -> Result<u32> {
        if self.is_implementation_specific() {
            return Err(Error::ImplementationSpecificPixelSize { format: self.0 });
        }
        match self.desc() {
            Some(desc) => Ok(desc.size),
            None => Err(Error::UnknownFormat { value: self.0 }),
        }
    }

    /// Symbolic name of a defined value, `None` otherwise.
    #[inline]
    pub fn name(self) -> Option<&'static str> {
        self.desc().map(|desc| desc.name)
    }

    /// Reconstructs a format value from its raw 32-bit representation.
    ///
    /// No validation is performed; the result may be neither defined nor
    /// implementation-specific.
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The raw 32-bit representation.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Iterates the defined vocabulary in increasing tag-value order.
    pub fn defined() -> impl Iterator<Item = Self> {
        (1..=PIXEL_FORMATS.len() as u32).map(Self)
    }

    fn desc(self) -> Option<&'static FormatDesc> {
        if self.is_implementation_specific() {
            return None;
        }
        PIXEL_FORMATS.get((self.0 as usize).wrapping_sub(1))
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_implementation_specific() {
            write!(
                f,
                "PixelFormat::ImplementationSpecific({:#x})",
                self.0 & !IMPLEMENTATION_SPECIFIC
            )
        } else if let Some(name) = self.name() {
            write!(f, "PixelFormat::{name}")
        } else {
            write!(f, "PixelFormat({:#x})", self.0)
        }
    }
}

/// Format of block-compressed pixel data.
///
/// Same tag-bit value space as [`PixelFormat`], but naming
/// block-compressed formats. Per-pixel size is not tracked for
/// compressed data; layout is determined by block metadata carried in
/// [`CompressedPixelStorage`](crate::storage::CompressedPixelStorage).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CompressedPixelFormat(u32);

#[allow(non_upper_case_globals)]
impl CompressedPixelFormat {
    /// S3TC BC1 compressed RGB, unsigned normalized.
    pub const Bc1RGBUnorm: Self = Self(1);
    /// S3TC BC1 compressed RGBA, unsigned normalized.
    pub const Bc1RGBAUnorm: Self = Self(2);
    /// S3TC BC2 compressed RGBA, unsigned normalized.
    pub const Bc2RGBAUnorm: Self = Self(3);
    /// S3TC BC3 compressed RGBA, unsigned normalized.
    pub const Bc3RGBAUnorm: Self = Self(4);
}

impl CompressedPixelFormat {
    /// Embeds an implementation-specific backend format code.
    ///
    /// # Errors
    ///
    /// [`Error::FormatCodeTooWide`] if `code` has its highest bit set.
    #[inline]
    pub fn wrap(code: u32) -> Result<Self> {
        if code & IMPLEMENTATION_SPECIFIC != 0 {
            return Err(Error::FormatCodeTooWide { code });
        }
        Ok(Self(IMPLEMENTATION_SPECIFIC | code))
    }

    /// Extracts the backend format code out of an implementation-specific
    /// value.
    ///
    /// # Errors
    ///
    /// [`Error::NotImplementationSpecific`] if the tag bit is not set.
    #[inline]
    pub fn unwrap(self) -> Result<u32> {
        if !self.is_implementation_specific() {
            return Err(Error::NotImplementationSpecific { value: self.0 });
        }
        Ok(self.0 & !IMPLEMENTATION_SPECIFIC)
    }

    /// Whether this value carries a wrapped backend format code.
    #[inline]
    pub const fn is_implementation_specific(self) -> bool {
        self.0 & IMPLEMENTATION_SPECIFIC != 0
    }

    /// Symbolic name of a defined value, `None` otherwise.
    pub fn name(self) -> Option<&'static str> {
        if self.is_implementation_specific() {
            return None;
        }
        COMPRESSED_PIXEL_FORMATS
            .get((self.0 as usize).wrapping_sub(1))
            .copied()
    }

    /// Reconstructs a format value from its raw 32-bit representation.
    ///
    /// No validation is performed.
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The raw 32-bit representation.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Iterates the defined vocabulary in increasing tag-value order.
    pub fn defined() -> impl Iterator<Item = Self> {
        (1..=COMPRESSED_PIXEL_FORMATS.len() as u32).map(Self)
    }
}

impl fmt::Debug for CompressedPixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_implementation_specific() {
            write!(
                f,
                "CompressedPixelFormat::ImplementationSpecific({:#x})",
                self.0 & !IMPLEMENTATION_SPECIFIC
            )
        } else if let Some(name) = self.name() {
            write!(f, "CompressedPixelFormat::{name}")
        } else {
            write!(f, "CompressedPixelFormat({:#x})", self.0)
        }
    }
}

/// Mapping between the portable vocabulary and a backend's native format
/// identifiers.
///
/// Implemented by backend modules (OpenGL, Vulkan, Metal wrappers and
/// the like), consumed here only as a contract. The mapping must be
/// *total and gapless* over the defined subset: every defined
/// [`PixelFormat`] has exactly one backend pair. Implementation-specific
/// values bypass the bridge entirely; `to_backend` returns `None` for
/// them, and totality over the defined range is verified by exhaustive
/// enumeration in tests.
pub trait FormatBridge {
    /// Backend pixel format identifier (e.g. the OpenGL format enum).
    type Format: Copy;
    /// Secondary backend discriminator (e.g. the OpenGL type enum).
    type Kind: Copy;

    /// Maps a defined portable format to its backend pair.
    fn to_backend(format: PixelFormat) -> Option<(Self::Format, Self::Kind)>;

    /// Maps a backend pair back to the portable format it came from.
    ///
    /// Declared inverse of [`to_backend`](Self::to_backend) over the
    /// defined subset only.
    fn from_backend(format: Self::Format, kind: Self::Kind) -> Option<PixelFormat>;
}
