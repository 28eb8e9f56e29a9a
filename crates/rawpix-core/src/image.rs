//! Owning image containers.
//!
//! # Overview
//!
//! - [`Image`] - Uncompressed pixel data with format and storage
//!   descriptors, generic over dimension count
//! - [`CompressedImage`] - Block-compressed counterpart
//! - Aliases [`Image1D`], [`Image2D`], [`Image3D`] and the compressed
//!   equivalents
//!
//! An image owns its backing `Vec<u8>` together with everything needed
//! to interpret it: a [`PixelFormat`], optional backend-specific extra
//! descriptor, pixel size and [`PixelStorage`] layout parameters. The
//! buffer is validated against the descriptor-derived minimum size at
//! construction, so downstream consumers can slice rows and slices
//! without bounds anxiety.
//!
//! Images are movable but deliberately not `Clone`; pixel buffers get
//! copied only when the caller does so explicitly. The buffer can be
//! reclaimed without copying via [`Image::release()`].
//!
//! # Usage
//!
//! ```rust
//! use rawpix_core::{Image2D, PixelFormat};
//!
//! let image = Image2D::new(PixelFormat::RGBA8Unorm, [2, 2], vec![0; 16]);
//! assert_eq!(image.pixel_size(), 4);
//! assert_eq!(image.data_properties().unwrap().total, 16);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::format`] - pixel size resolution
//! - [`crate::storage`] - layout computation and validation
//! - [`bytemuck`] - typed reinterpretation of the byte buffer
//!
//! # Used By
//!
//! - [`crate::view`] - [`Image::as_view()`] conversion target

use crate::format::{CompressedPixelFormat, PixelFormat};
use crate::storage::{pad_size, CompressedPixelStorage, DataProperties, PixelStorage};

/// A 1D [`Image`].
pub type Image1D = Image<1>;
/// A 2D [`Image`].
pub type Image2D = Image<2>;
/// A 3D [`Image`].
pub type Image3D = Image<3>;

/// A 1D [`CompressedImage`].
pub type CompressedImage1D = CompressedImage<1>;
/// A 2D [`CompressedImage`].
pub type CompressedImage2D = CompressedImage<2>;
/// A 3D [`CompressedImage`].
pub type CompressedImage3D = CompressedImage<3>;

/// Resolves the pixel size of a defined format, panicking on values the
/// table cannot answer for. Constructors taking a [`PixelFormat`]
/// directly only accept defined values; backend codes go through the
/// `with_backend_format` constructors with an explicit pixel size.
pub(crate) fn resolve_pixel_size(format: PixelFormat) -> u32 {
    match format.pixel_size() {
        Ok(size) => size,
        Err(err) => panic!("{err}"),
    }
}

/// Wraps a backend format code, panicking if the code has the tag bit
/// set. Passing an already-wrapped value is a caller bug.
pub(crate) fn wrap_format(code: u32) -> PixelFormat {
    match PixelFormat::wrap(code) {
        Ok(format) => format,
        Err(err) => panic!("{err}"),
    }
}

/// Same as [`wrap_format`] for the compressed value space.
pub(crate) fn wrap_compressed_format(code: u32) -> CompressedPixelFormat {
    match CompressedPixelFormat::wrap(code) {
        Ok(format) => format,
        Err(err) => panic!("{err}"),
    }
}

/// Checks a pixel buffer against the descriptor-derived minimum size.
/// A zero pixel size marks an opaque backend blob and skips the check.
pub(crate) fn check_data_size<const D: usize>(
    storage: &PixelStorage,
    pixel_size: u32,
    size: [i32; D],
    data_len: usize,
) {
    if pixel_size == 0 {
        return;
    }
    let expected = storage.data_properties(pixel_size, pad_size(size)).total;
    assert!(
        data_len >= expected,
        "bad image data size, got {data_len} but expected at least {expected}"
    );
}

/// Checks a compressed buffer against the block-derived minimum size.
/// Runs only when the storage carries complete block metadata;
/// otherwise the layout is unknowable and the buffer is taken as-is.
pub(crate) fn check_compressed_data_size<const D: usize>(
    storage: &CompressedPixelStorage,
    size: [i32; D],
    data_len: usize,
) {
    if let Some(properties) = storage.data_properties(pad_size(size)) {
        assert!(
            data_len >= properties.total,
            "bad image data size, got {} but expected at least {}",
            data_len,
            properties.total
        );
    }
}

/// Uncompressed image data of dimension `D`.
///
/// See the [module docs](self) for an overview. The dimension count is
/// limited to 1, 2 or 3; other values fail to compile.
#[derive(Debug)]
pub struct Image<const D: usize> {
    storage: PixelStorage,
    format: PixelFormat,
    format_extra: u32,
    pixel_size: u32,
    size: [i32; D],
    data: Vec<u8>,
}

impl<const D: usize> Image<D> {
    /// Creates an image with default storage parameters.
    ///
    /// # Panics
    ///
    /// If `format` is implementation-specific or unknown (use
    /// [`with_backend_format()`](Self::with_backend_format) for backend
    /// codes), or if `data` is smaller than the layout requires.
    pub fn new(format: PixelFormat, size: [i32; D], data: Vec<u8>) -> Self {
        Self::with_storage(PixelStorage::default(), format, size, data)
    }

    /// Creates an image with explicit storage parameters.
    ///
    /// # Panics
    ///
    /// Same conditions as [`new()`](Self::new).
    pub fn with_storage(
        storage: PixelStorage,
        format: PixelFormat,
        size: [i32; D],
        data: Vec<u8>,
    ) -> Self {
        let pixel_size = resolve_pixel_size(format);
        check_data_size(&storage, pixel_size, size, data.len());
        Self { storage, format, format_extra: 0, pixel_size, size, data }
    }

    /// Creates an image holding data in a backend-native format.
    ///
    /// `code` is the backend's format identifier and gets wrapped as an
    /// implementation-specific [`PixelFormat`]; `format_extra` is an
    /// optional secondary backend descriptor stored verbatim.
    /// `pixel_size` zero marks the data as an opaque blob: buffer
    /// validation and [`data_properties()`](Self::data_properties) are
    /// disabled.
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
        data: Vec<u8>,
    ) -> Self {
        let format = wrap_format(code);
        check_data_size(&storage, pixel_size, size, data.len());
        Self { storage, format, format_extra, pixel_size, size, data }
    }

    /// Like [`with_backend_format()`](Self::with_backend_format), with
    /// the pixel size computed by a caller-supplied strategy from the
    /// backend format pair. Backend integrations pass their own size
    /// lookup here instead of pre-computing it at every call site.
    pub fn with_backend_format_by(
        storage: PixelStorage,
        code: u32,
        format_extra: u32,
        size: [i32; D],
        data: Vec<u8>,
        pixel_size: impl FnOnce(u32, u32) -> u32,
    ) -> Self {
        let pixel_size = pixel_size(code, format_extra);
        Self::with_backend_format(storage, code, format_extra, pixel_size, size, data)
    }

    /// Creates a zero-sized image with no data, to be filled in later
    /// by moving a populated image over it.
    ///
    /// # Panics
    ///
    /// If `format` is implementation-specific or unknown.
    pub fn placeholder(storage: PixelStorage, format: PixelFormat) -> Self {
        let pixel_size = resolve_pixel_size(format);
        Self {
            storage,
            format,
            format_extra: 0,
            pixel_size,
            size: [0; D],
            data: Vec::new(),
        }
    }

    /// Backend-format counterpart of [`placeholder()`](Self::placeholder).
    ///
    /// # Panics
    ///
    /// If `code` has its highest bit set.
    pub fn backend_placeholder(
        storage: PixelStorage,
        code: u32,
        format_extra: u32,
        pixel_size: u32,
    ) -> Self {
        Self {
            storage,
            format: wrap_format(code),
            format_extra,
            pixel_size,
            size: [0; D],
            data: Vec::new(),
        }
    }

    /// Storage layout parameters.
    #[inline]
    pub const fn storage(&self) -> PixelStorage {
        self.storage
    }

    /// Pixel format; implementation-specific for images constructed
    /// from a backend code.
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

    /// Whether the image has zero pixels in any dimension.
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&component| component == 0)
    }

    /// Raw byte buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Resolved byte layout, or `None` for opaque backend blobs whose
    /// pixel size is unknown.
    pub fn data_properties(&self) -> Option<DataProperties> {
        if self.pixel_size == 0 {
            return None;
        }
        Some(self.storage.data_properties(self.pixel_size, pad_size(self.size)))
    }

    /// The buffer reinterpreted as a slice of `T`.
    ///
    /// # Panics
    ///
    /// If the buffer length is not a multiple of `size_of::<T>()` or
    /// the allocation is not aligned for `T`.
    pub fn pixels<T: bytemuck::Pod>(&self) -> &[T] {
        bytemuck::cast_slice(&self.data)
    }

    /// Releases the data buffer, resetting the size to zero.
    ///
    /// The image stays valid, behaving like a
    /// [`placeholder()`](Self::placeholder); a second call returns an
    /// empty buffer.
    pub fn release(&mut self) -> Vec<u8> {
        self.size = [0; D];
        std::mem::take(&mut self.data)
    }

    /// A non-owning view of this image.
    pub fn as_view(&self) -> crate::view::ImageView<'_, D> {
        crate::view::ImageView::from_parts(
            self.storage,
            self.format,
            self.format_extra,
            self.pixel_size,
            self.size,
            &self.data,
        )
    }
}

/// Block-compressed image data of dimension `D`.
///
/// Unlike [`Image`], no per-pixel size is tracked; the byte layout
/// depends on the block metadata in [`CompressedPixelStorage`]. Buffer
/// validation runs only when that metadata is complete.
#[derive(Debug)]
pub struct CompressedImage<const D: usize> {
    storage: CompressedPixelStorage,
    format: CompressedPixelFormat,
    size: [i32; D],
    data: Vec<u8>,
}

impl<const D: usize> CompressedImage<D> {
    /// Creates a compressed image with default storage parameters.
    pub fn new(format: CompressedPixelFormat, size: [i32; D], data: Vec<u8>) -> Self {
        Self::with_storage(CompressedPixelStorage::default(), format, size, data)
    }

    /// Creates a compressed image with explicit storage parameters.
    ///
    /// # Panics
    ///
    /// If the storage carries complete block metadata and `data` is
    /// smaller than the layout requires. With incomplete metadata the
    /// buffer is taken as-is.
    pub fn with_storage(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [i32; D],
        data: Vec<u8>,
    ) -> Self {
        check_compressed_data_size(&storage, size, data.len());
        Self { storage, format, size, data }
    }

    /// Creates a compressed image holding data in a backend-native
    /// format.
    ///
    /// # Panics
    ///
    /// If `code` has its highest bit set, or on the same buffer-size
    /// condition as [`with_storage()`](Self::with_storage).
    pub fn with_backend_format(
        storage: CompressedPixelStorage,
        code: u32,
        size: [i32; D],
        data: Vec<u8>,
    ) -> Self {
        Self::with_storage(storage, wrap_compressed_format(code), size, data)
    }

    /// Creates a zero-sized compressed image with no data and an
    /// undefined format, to be filled in later by moving a populated
    /// image over it.
    pub fn placeholder(storage: CompressedPixelStorage) -> Self {
        Self {
            storage,
            format: CompressedPixelFormat::from_raw(0),
            size: [0; D],
            data: Vec::new(),
        }
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

    /// Whether the image has zero pixels in any dimension.
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&component| component == 0)
    }

    /// Raw byte buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Resolved byte layout, or `None` when the storage's block
    /// metadata is incomplete.
    pub fn data_properties(&self) -> Option<DataProperties> {
        self.storage.data_properties(pad_size(self.size))
    }

    /// Releases the data buffer, resetting the size to zero.
    pub fn release(&mut self) -> Vec<u8> {
        self.size = [0; D];
        std::mem::take(&mut self.data)
    }

    /// A non-owning view of this image.
    pub fn as_view(&self) -> crate::view::CompressedImageView<'_, D> {
        crate::view::CompressedImageView::from_parts(
            self.storage,
            self.format,
            self.size,
            &self.data,
        )
    }
}
