//! # rawpix-core
//!
//! Core types for describing raw pixel buffers.
//!
//! This crate provides the foundational vocabulary for handing pixel
//! data between image loaders, processors and GPU backends:
//!
//! - [`PixelFormat`], [`CompressedPixelFormat`] - Portable format tags
//!   with a lossless escape hatch for backend-native format codes
//! - [`PixelStorage`], [`CompressedPixelStorage`] - Layout parameters
//!   (alignment, row length, skip, block metadata) and the
//!   [`DataProperties`] they resolve to
//! - [`Image`], [`ImageView`] - Owning and borrowing containers that
//!   pair a byte buffer with its format and layout descriptors
//! - [`CompressedImage`], [`CompressedImageView`] - Block-compressed
//!   counterparts
//! - [`FormatBridge`] - Contract for backend format mapping modules
//!
//! ## Design Philosophy
//!
//! Pixel data is just bytes plus a *descriptor*. The descriptor is kept
//! small, plain and copyable, and every container validates its buffer
//! against the descriptor-derived minimum size at construction. A
//! successfully constructed image or view is therefore always safe to
//! slice by rows and slices; size mismatches fail loudly at the
//! boundary instead of corrupting reads deep inside a consumer.
//!
//! ```rust
//! use rawpix_core::prelude::*;
//!
//! let image = Image2D::new(PixelFormat::RGB8Unorm, [2, 2], vec![0; 16]);
//! let view: ImageView2D = image.as_view();
//! assert_eq!(view.data_properties().unwrap().size, [8, 2, 1]);
//! ```
//!
//! Backend-native formats are embedded, not modeled: a wrapped format
//! code travels through the same types with its pixel size supplied by
//! the backend, so portable and backend-specific pixel data share one
//! code path.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod storage;
pub mod view;

// Re-exports for convenience
pub use error::{Error, Result};
pub use format::{CompressedPixelFormat, FormatBridge, PixelFormat};
pub use image::{
    CompressedImage, CompressedImage1D, CompressedImage2D, CompressedImage3D, Image, Image1D,
    Image2D, Image3D,
};
pub use storage::{CompressedPixelStorage, DataProperties, PixelStorage};
pub use view::{
    CompressedImageView, CompressedImageView1D, CompressedImageView2D, CompressedImageView3D,
    ImageView, ImageView1D, ImageView2D, ImageView3D,
};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use rawpix_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::{CompressedPixelFormat, FormatBridge, PixelFormat};
    pub use crate::image::{
        CompressedImage, CompressedImage1D, CompressedImage2D, CompressedImage3D, Image,
        Image1D, Image2D, Image3D,
    };
    pub use crate::storage::{CompressedPixelStorage, DataProperties, PixelStorage};
    pub use crate::view::{
        CompressedImageView, CompressedImageView1D, CompressedImageView2D,
        CompressedImageView3D, ImageView, ImageView1D, ImageView2D, ImageView3D,
    };
}
