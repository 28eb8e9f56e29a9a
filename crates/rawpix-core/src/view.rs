//! Non-owning image views.
//!
//! # Overview
//!
//! - [`ImageView`] - Borrowed uncompressed pixel data with the same
//!   descriptors as [`Image`](crate::image::Image)
//! - [`CompressedImageView`] - Block-compressed counterpart
//! - Aliases [`ImageView1D`], [`ImageView2D`], [`ImageView3D`] and the
//!   compressed equivalents
//!
//! Views carry format, size and storage descriptors by value and borrow
//! the pixel bytes. They are `Copy` and cheap to pass around, which
//! makes them the natural parameter type for anything that consumes
//! pixel data without taking ownership. Validation mirrors the owning
//! containers: the borrowed slice is checked against the
//! descriptor-derived minimum size at construction and again on
//! [`set_data()`](ImageView::set_data).
//!
//! # Usage
//!
//! ```rust
//! use rawpix_core::{ImageView2D, PixelFormat};
//!
//! let pixels = [0u8; 16];
//! let view = ImageView2D::new(PixelFormat::RGBA8Unorm, [2, 2], &pixels);
//! assert_eq!(view.data_properties().unwrap().total, 16);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::format`] - pixel size resolution
//! - [`crate::storage`] - layout computation and validation
//! - [`bytemuck`] - typed reinterpretation of the byte slice

use crate::format::{CompressedPixelFormat, PixelFormat};
use crate::image::{
    check_compressed_data_size, check_data_size, resolve_pixel_size, wrap_compressed_format,
    wrap_format,
};
use crate::storage::{pad_size, CompressedPixelStorage, DataProperties, PixelStorage};

/// A 1D [`ImageView`].
pub type ImageView1D<'a> = ImageView<'a, 1>;
/// A 2D [`ImageView`].
pub type ImageView2D<'a> = ImageView<'a, 2>;
/// A 3D [`ImageView`].
pub type ImageView3D<'a> = ImageView<'a, 3>;

/// A 1D [`CompressedImageView`].
pub type CompressedImageView1D<'a> = CompressedImageView<'a, 1>;
/// A 2D [`CompressedImageView`].
pub type CompressedImageView2D<'a> = CompressedImageView<'a, 2>;
/// A 3D [`CompressedImageView`].
pub type CompressedImageView3D<'a> = CompressedImageView<'a, 3>;

/// Non-owning uncompressed image data of dimension `D`.
///
/// See the [module docs](self) for an overview.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, const D: usize> {
    storage: PixelStorage,
    format: PixelFormat,
    format_extra: u32,
    pixel_size: u32,
    size: [i32; D],
    data: &'a [u8],
}

impl<'a, const D: usize> ImageView<'a, D> {
    /// Creates a view with default storage parameters.
    ///
    /// # Panics
    ///
    /// If `format` is implementation-specific or unknown (use
    /// [`with_backend_format()`](Self::with_backend_format) for backend
    /// codes), or if `data` is smaller than the layout requires.
    pub fn new(format: PixelFormat, size: [i32; D], data: &'a [u8]) -> Self {
        Self::with_storage(PixelStorage::default(), format, size, data)
    }

    /// Creates a view with explicit storage parameters.
    ///
    /// # Panics
    ///
    /// Same conditions as [`new()`](Self::new).
    pub fn with_storage(
        storage: PixelStorage,
        format: PixelFormat,
        size: [i32; D],
        data: &'a [u8],
    ) -> Self {
        let pixel_size = resolve_pixel_size(format);
        check_data_size(&storage, pixel_size, size, data.len());
        Self { storage, format, format_extra: 0, pixel_size, size, data }
    }

    /// Creates a view of data in a backend-native format. Semantics
    /// match
    /// [`Image::with_backend_format()`](crate::image::Image::with_backend_format),
    /// including the opaque-blob mode for `pixel_size` zero.
    ///
    /// # Panics
    ///
    /// If `code` has its highest bit set, or if `pixel_size` is nonzero
    /// and `data` is smaller than the layout requires.
    pub fn with_backend_format(
        storage: PixelStorage,
        code: u32,
        format_extra: u32,
        pixel_size: u32,
        size: [i32; D],
        data: &'a [u8],
    ) -> Self {
        let format = wrap_format(code);
        check_data_size(&storage, pixel_size, size, data.len());
        Self { storage, format, format_extra, pixel_size, size, data }
    }

    /// Like [`with_backend_format()`](Self::with_backend_format), with
    /// the pixel size computed by a caller-supplied strategy from the
    /// backend format pair.
    pub fn with_backend_format_by(
        storage: PixelStorage,
        code: u32,
        format_extra: u32,
        size: [i32; D],
        data: &'a [u8],
        pixel_size: impl FnOnce(u32, u32) -> u32,
    ) -> Self {
        let pixel_size = pixel_size(code, format_extra);
        Self::with_backend_format(storage, code, format_extra, pixel_size, size, data)
    }

    /// Creates a view with a fixed size but no data yet, for two-step
    /// initialization through [`set_data()`](Self::set_data).
    ///
    /// Unlike [`Image::placeholder()`](crate::image::Image::placeholder)
    /// the size is part of the placeholder; the later data assignment
    /// is validated against it.
    ///
    /// # Panics
    ///
    /// If `format` is implementation-specific or unknown.
    pub fn placeholder(storage: PixelStorage, format: PixelFormat, size: [i32; D]) -> Self {
        let pixel_size = resolve_pixel_size(format);
        Self { storage, format, format_extra: 0, pixel_size, size, data: &[] }
    }

    /// Internal unchecked constructor for conversion from validated
    /// containers.
    pub(crate) fn from_parts(
        storage: PixelStorage,
        format: PixelFormat,
        format_extra: u32,
        pixel_size: u32,
        size: [i32; D],
        data: &'a [u8],
    ) -> Self {
        Self { storage, format, format_extra, pixel_size, size, data }
    }

    /// Replaces the viewed data, keeping all descriptors.
    ///
    /// # Panics
    ///
    /// If `data` is smaller than the fixed descriptors require.
    pub fn set_data(&mut self, data: &'a [u8]) {
        check_data_size(&self.storage, self.pixel_size, self.size, data.len());
        self.data = data;
    }

    /// Storage layout parameters.
    #[inline]
    pub const fn storage(&self) -> PixelStorage {
        self.storage
    }

    /// Pixel format; implementation-specific for views constructed from
    /// a backend code.
    #[inline]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Secondary backend format descriptor, zero unless set at
    /// construction.
    #[inline]
    pub const fn format_extra(&self) -> u32 {
        self.format_extra
    }

    /// Size of a pixel in bytes, zero for opaque backend blobs.
    #[inline]
    pub const fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Image size in pixels.
    #[inline]
    pub const fn size(&self) -> [i32; D] {
        self.size
    }

    /// Whether the view spans zero pixels in any dimension.
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&component| component == 0)
    }

    /// Viewed byte slice.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Resolved byte layout, or `None` for opaque backend blobs whose
    /// pixel size is unknown.
    pub fn data_properties(&self) -> Option<DataProperties> {
        if self.pixel_size == 0 {
            return None;
        }
        Some(self.storage.data_properties(self.pixel_size, pad_size(self.size)))
    }

    /// The viewed bytes reinterpreted as a slice of `T`.
    ///
    /// # Panics
    ///
    /// If the slice length is not a multiple of `size_of::<T>()` or the
    /// slice is not aligned for `T`.
    pub fn pixels<T: bytemuck::Pod>(&self) -> &'a [T] {
        bytemuck::cast_slice(self.data)
    }
}

impl<'a, const D: usize> From<&'a crate::image::Image<D>> for ImageView<'a, D> {
    fn from(image: &'a crate::image::Image<D>) -> Self {
        image.as_view()
    }
}

/// Non-owning block-compressed image data of dimension `D`.
///
/// As with [`CompressedImage`](crate::image::CompressedImage), buffer
/// validation runs only when the storage carries complete block
/// metadata.
#[derive(Debug, Clone, Copy)]
pub struct CompressedImageView<'a, const D: usize> {
    storage: CompressedPixelStorage,
    format: CompressedPixelFormat,
    size: [i32; D],
    data: &'a [u8],
}

impl<'a, const D: usize> CompressedImageView<'a, D> {
    /// Creates a view with default storage parameters.
    pub fn new(format: CompressedPixelFormat, size: [i32; D], data: &'a [u8]) -> Self {
        Self::with_storage(CompressedPixelStorage::default(), format, size, data)
    }

    /// Creates a view with explicit storage parameters.
    ///
    /// # Panics
    ///
    /// If the storage carries complete block metadata and `data` is
    /// smaller than the layout requires.
    pub fn with_storage(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [i32; D],
        data: &'a [u8],
    ) -> Self {
        check_compressed_data_size(&storage, size, data.len());
        Self { storage, format, size, data }
    }

    /// Creates a view of data in a backend-native compressed format.
    ///
    /// # Panics
    ///
    /// If `code` has its highest bit set, or on the same buffer-size
    /// condition as [`with_storage()`](Self::with_storage).
    pub fn with_backend_format(
        storage: CompressedPixelStorage,
        code: u32,
        size: [i32; D],
        data: &'a [u8],
    ) -> Self {
        Self::with_storage(storage, wrap_compressed_format(code), size, data)
    }

    /// Creates a view with a fixed size but no data yet, for two-step
    /// initialization through [`set_data()`](Self::set_data).
    pub fn placeholder(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [i32; D],
    ) -> Self {
        Self { storage, format, size, data: &[] }
    }

    /// Internal unchecked constructor for conversion from validated
    /// containers.
    pub(crate) fn from_parts(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [i32; D],
        data: &'a [u8],
    ) -> Self {
        Self { storage, format, size, data }
    }

    /// Replaces the viewed data, keeping all descriptors.
    ///
    /// # Panics
    ///
    /// If the storage carries complete block metadata and `data` is
    /// smaller than the layout requires.
    pub fn set_data(&mut self, data: &'a [u8]) {
        check_compressed_data_size(&self.storage, self.size, data.len());
        self.data = data;
    }

    /// Storage layout parameters.
    #[inline]
    pub const fn storage(&self) -> CompressedPixelStorage {
        self.storage
    }

    /// Compressed pixel format.
    #[inline]
    pub const fn format(&self) -> CompressedPixelFormat {
        self.format
    }

    /// Image size in pixels.
    #[inline]
    pub const fn size(&self) -> [i32; D] {
        self.size
    }

    /// Whether the view spans zero pixels in any dimension.
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&component| component == 0)
    }

    /// Viewed byte slice.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Resolved byte layout, or `None` when the storage's block
    /// metadata is incomplete.
    pub fn data_properties(&self) -> Option<DataProperties> {
        self.storage.data_properties(pad_size(self.size))
    }
}

impl<'a, const D: usize> From<&'a crate::image::CompressedImage<D>>
    for CompressedImageView<'a, D>
{
    fn from(image: &'a crate::image::CompressedImage<D>) -> Self {
        image.as_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{CompressedImage2D, Image2D};

    #[test]
    fn test_construction() {
        let pixels = [0u8; 16];
        let view = ImageView2D::new(PixelFormat::RGBA8Unorm, [2, 2], &pixels);
        assert_eq!(view.format(), PixelFormat::RGBA8Unorm);
        assert_eq!(view.pixel_size(), 4);
        assert_eq!(view.size(), [2, 2]);
        assert_eq!(view.data().len(), 16);
    }

    #[test]
    #[should_panic(expected = "bad image data size, got 15 but expected at least 16")]
    fn test_construction_too_small() {
        let pixels = [0u8; 15];
        let _ = ImageView2D::new(PixelFormat::RGBA8Unorm, [2, 2], &pixels);
    }

    #[test]
    #[should_panic(expected = "can't determine pixel size")]
    fn test_construction_implementation_specific() {
        let pixels = [0u8; 4];
        let format = PixelFormat::wrap(0xdead).unwrap();
        let _ = ImageView2D::new(format, [1, 1], &pixels);
    }

    #[test]
    fn test_backend_format() {
        let pixels = [0u8; 16];
        let view = ImageView2D::with_backend_format(
            PixelStorage::default(),
            0x1908,
            0x1401,
            4,
            [2, 2],
            &pixels,
        );
        assert!(view.format().is_implementation_specific());
        assert_eq!(view.format_extra(), 0x1401);
    }

    #[test]
    fn test_backend_format_by() {
        // 3-byte pixels with the default alignment: two 8-byte strides.
        let pixels = [0u8; 16];
        let view = ImageView2D::with_backend_format_by(
            PixelStorage::default(),
            0x1907,
            0x1401,
            [2, 2],
            &pixels,
            |_, _| 3,
        );
        assert_eq!(view.pixel_size(), 3);
        assert_eq!(view.data_properties().unwrap().total, 16);
    }

    #[test]
    fn test_copy_semantics() {
        let pixels = [0u8; 4];
        let view = ImageView1D::new(PixelFormat::R8Unorm, [4], &pixels);
        let copy = view;
        assert_eq!(copy.data().as_ptr(), view.data().as_ptr());
    }

    #[test]
    fn test_placeholder_and_set_data() {
        let mut view =
            ImageView2D::placeholder(PixelStorage::default(), PixelFormat::R8Unorm, [4, 2]);
        assert!(view.data().is_empty());
        assert_eq!(view.size(), [4, 2]);

        let pixels = [0u8; 8];
        view.set_data(&pixels);
        assert_eq!(view.data().len(), 8);
    }

    #[test]
    #[should_panic(expected = "bad image data size, got 7 but expected at least 8")]
    fn test_set_data_too_small() {
        let mut view =
            ImageView2D::placeholder(PixelStorage::default(), PixelFormat::R8Unorm, [4, 2]);
        let pixels = [0u8; 7];
        view.set_data(&pixels);
    }

    #[test]
    fn test_opaque_blob() {
        let pixels = [0u8; 3];
        let view = ImageView2D::with_backend_format(
            PixelStorage::default(),
            0xdead,
            0,
            0,
            [16, 16],
            &pixels,
        );
        assert_eq!(view.data_properties(), None);
    }

    #[test]
    fn test_pixels() {
        let pixels = [1u16.to_le(), 2, 3, 4];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        let view = ImageView2D::new(PixelFormat::R16Unorm, [4, 1], bytes);
        assert_eq!(view.pixels::<u16>(), &pixels);
    }

    #[test]
    fn test_from_image() {
        let image = Image2D::new(PixelFormat::RG16F, [2, 2], vec![0; 16]);
        let view = ImageView2D::from(&image);
        assert_eq!(view.format(), PixelFormat::RG16F);
        assert_eq!(view.pixel_size(), 4);
        assert_eq!(view.size(), [2, 2]);
        assert_eq!(view.data().as_ptr(), image.data().as_ptr());
    }

    #[test]
    fn test_compressed_construction() {
        let blocks = [0u8; 32];
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8);
        let view = CompressedImageView2D::with_storage(
            storage,
            CompressedPixelFormat::Bc1RGBAUnorm,
            [8, 8],
            &blocks,
        );
        assert_eq!(view.data_properties().unwrap().total, 32);
    }

    #[test]
    #[should_panic(expected = "bad image data size")]
    fn test_compressed_construction_too_small() {
        let blocks = [0u8; 16];
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8);
        let _ = CompressedImageView2D::with_storage(
            storage,
            CompressedPixelFormat::Bc1RGBAUnorm,
            [8, 8],
            &blocks,
        );
    }

    #[test]
    fn test_compressed_placeholder_and_set_data() {
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8);
        let mut view = CompressedImageView2D::placeholder(
            storage,
            CompressedPixelFormat::Bc2RGBAUnorm,
            [4, 4],
        );
        let blocks = [0u8; 8];
        view.set_data(&blocks);
        assert_eq!(view.data().len(), 8);
    }

    #[test]
    fn test_compressed_from_image() {
        let image = CompressedImage2D::new(
            CompressedPixelFormat::Bc3RGBAUnorm,
            [4, 4],
            vec![0; 16],
        );
        let view = CompressedImageView2D::from(&image);
        assert_eq!(view.format(), CompressedPixelFormat::Bc3RGBAUnorm);
        assert_eq!(view.data().as_ptr(), image.data().as_ptr());
    }
}
