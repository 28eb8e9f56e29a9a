//! Pixel storage layout description.
//!
//! # Overview
//!
//! - [`PixelStorage`] - Row alignment, row length override and skip
//!   offsets for uncompressed data
//! - [`CompressedPixelStorage`] - Block metadata and skip offsets for
//!   block-compressed data
//! - [`DataProperties`] - Resolved byte offsets, strides and total size
//!
//! Storage parameters describe how pixels are laid out in a linear
//! buffer independently of the pixel format. The same parameters a GPU
//! API expresses as unpack state (row alignment, row length, skip) are
//! captured here as a plain value type, so the required buffer size can
//! be computed and checked up front instead of at upload time.
//!
//! # Usage
//!
//! ```rust
//! use rawpix_core::PixelStorage;
//!
//! let storage = PixelStorage::default().with_row_length(128);
//! let props = storage.data_properties(4, [100, 100, 1]);
//! assert_eq!(props.size[0], 512); // row stride follows the override
//! ```
//!
//! # Used By
//!
//! - [`crate::image`] - buffer size validation at construction
//! - [`crate::view`] - buffer size validation at construction

/// Default row alignment, matching the unpack default of common GPU
/// APIs.
const DEFAULT_ALIGNMENT: i32 = 4;

/// Resolved layout of a pixel buffer.
///
/// Produced by [`PixelStorage::data_properties()`] and
/// [`CompressedPixelStorage::data_properties()`]. All quantities are in
/// bytes except the trailing components of `size`, which count rows and
/// slices (or block rows and block slices for compressed data).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataProperties {
    /// Byte offset of the first accessed pixel for each dimension:
    /// `[skipped bytes in a row, skipped rows in bytes, skipped slices
    /// in bytes]`.
    pub offset: [usize; 3],
    /// `[row stride in bytes, row count, slice count]`.
    pub size: [usize; 3],
    /// Total byte count the buffer has to hold: the offsets plus the
    /// accessed pixel block.
    pub total: usize,
}

/// Storage parameters for uncompressed pixel data.
///
/// A plain value; setters return a new value builder-style. The
/// defaults (alignment 4, no row length override, no skip) describe a
/// tightly packed buffer with rows padded to four bytes.
///
/// # Example
///
/// ```rust
/// use rawpix_core::PixelStorage;
///
/// let storage = PixelStorage::default()
///     .with_alignment(1)
///     .with_skip([0, 4, 0]);
/// let props = storage.data_properties(3, [5, 8, 1]);
/// assert_eq!(props.offset, [0, 60, 0]);
/// assert_eq!(props.total, 60 + 15 * 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelStorage {
    alignment: i32,
    row_length: i32,
    skip: [i32; 3],
}

impl Default for PixelStorage {
    fn default() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
            row_length: 0,
            skip: [0; 3],
        }
    }
}

impl PixelStorage {
    /// Sets the row alignment in bytes.
    ///
    /// # Panics
    ///
    /// If `alignment` is not a positive power of two.
    #[must_use]
    pub fn with_alignment(mut self, alignment: i32) -> Self {
        assert!(
            alignment > 0 && (alignment & (alignment - 1)) == 0,
            "alignment {alignment} is not a power of two"
        );
        self.alignment = alignment;
        self
    }

    /// Sets the row length in pixels, overriding the image width for
    /// stride purposes. Zero means rows are as long as the image is
    /// wide.
    ///
    /// # Panics
    ///
    /// If `row_length` is negative.
    #[must_use]
    pub fn with_row_length(mut self, row_length: i32) -> Self {
        assert!(row_length >= 0, "row length {row_length} can't be negative");
        self.row_length = row_length;
        self
    }

    /// Sets the number of pixels, rows and slices to skip at the start
    /// of the buffer.
    ///
    /// # Panics
    ///
    /// If any component is negative.
    #[must_use]
    pub fn with_skip(mut self, skip: [i32; 3]) -> Self {
        assert!(
            skip.iter().all(|&component| component >= 0),
            "skip {skip:?} can't be negative"
        );
        self.skip = skip;
        self
    }

    /// Row alignment in bytes.
    #[inline]
    pub const fn alignment(&self) -> i32 {
        self.alignment
    }

    /// Row length override in pixels, zero if unset.
    #[inline]
    pub const fn row_length(&self) -> i32 {
        self.row_length
    }

    /// Skip offsets in pixels, rows and slices.
    #[inline]
    pub const fn skip(&self) -> [i32; 3] {
        self.skip
    }

    /// Computes offsets, strides and the required total size for an
    /// image of the given pixel size and dimensions.
    ///
    /// The row stride is the effective row length (the override, or the
    /// image width) times the pixel size, rounded up to the alignment.
    /// If any size component is zero the result is all zeros; an empty
    /// image needs no backing bytes regardless of skip.
    ///
    /// # Panics
    ///
    /// If any size component is negative.
    pub fn data_properties(&self, pixel_size: u32, size: [i32; 3]) -> DataProperties {
        debug_assert!(pixel_size != 0, "pixel size has to be known");
        assert!(
            size.iter().all(|&component| component >= 0),
            "image size {size:?} can't be negative"
        );
        if size.iter().any(|&component| component == 0) {
            return DataProperties::default();
        }

        let pixel_size = pixel_size as usize;
        let row_length = if self.row_length != 0 {
            self.row_length as usize
        } else {
            size[0] as usize
        };
        let alignment = self.alignment as usize;
        let row_stride = (row_length * pixel_size).div_ceil(alignment) * alignment;

        let offset = [
            self.skip[0] as usize * pixel_size,
            self.skip[1] as usize * row_stride,
            self.skip[2] as usize * row_stride * size[1] as usize,
        ];
        let total = offset.iter().sum::<usize>()
            + row_stride * size[1] as usize * size[2] as usize;
        DataProperties {
            offset,
            size: [row_stride, size[1] as usize, size[2] as usize],
            total,
        }
    }
}

/// Storage parameters for block-compressed pixel data.
///
/// In addition to the skip and row-length parameters shared with
/// [`PixelStorage`], compressed layout depends on the block dimensions
/// and the byte size of one encoded block. Both default to zero,
/// meaning *unspecified*; layout can only be resolved once they are
/// filled in, typically from the compressed format's definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressedPixelStorage {
    block_size: [i32; 3],
    block_data_size: i32,
    row_length: i32,
    skip: [i32; 3],
}

impl CompressedPixelStorage {
    /// Sets the compression block dimensions in pixels. Zero components
    /// mean the block size is unspecified.
    ///
    /// # Panics
    ///
    /// If any component is negative.
    #[must_use]
    pub fn with_block_size(mut self, block_size: [i32; 3]) -> Self {
        assert!(
            block_size.iter().all(|&component| component >= 0),
            "block size {block_size:?} can't be negative"
        );
        self.block_size = block_size;
        self
    }

    /// Sets the byte size of one encoded block. Zero means unspecified.
    ///
    /// # Panics
    ///
    /// If `block_data_size` is negative.
    #[must_use]
    pub fn with_block_data_size(mut self, block_data_size: i32) -> Self {
        assert!(
            block_data_size >= 0,
            "block data size {block_data_size} can't be negative"
        );
        self.block_data_size = block_data_size;
        self
    }

    /// Sets the row length in pixels, overriding the image width for
    /// stride purposes. Zero means rows are as long as the image is
    /// wide.
    ///
    /// # Panics
    ///
    /// If `row_length` is negative.
    #[must_use]
    pub fn with_row_length(mut self, row_length: i32) -> Self {
        assert!(row_length >= 0, "row length {row_length} can't be negative");
        self.row_length = row_length;
        self
    }

    /// Sets the number of pixels, rows and slices to skip at the start
    /// of the buffer.
    ///
    /// # Panics
    ///
    /// If any component is negative.
    #[must_use]
    pub fn with_skip(mut self, skip: [i32; 3]) -> Self {
        assert!(
            skip.iter().all(|&component| component >= 0),
            "skip {skip:?} can't be negative"
        );
        self.skip = skip;
        self
    }

    /// Compression block dimensions in pixels, zero components if
    /// unspecified.
    #[inline]
    pub const fn block_size(&self) -> [i32; 3] {
        self.block_size
    }

    /// Byte size of one encoded block, zero if unspecified.
    #[inline]
    pub const fn block_data_size(&self) -> i32 {
        self.block_data_size
    }

    /// Row length override in pixels, zero if unset.
    #[inline]
    pub const fn row_length(&self) -> i32 {
        self.row_length
    }

    /// Skip offsets in pixels, rows and slices.
    #[inline]
    pub const fn skip(&self) -> [i32; 3] {
        self.skip
    }

    /// Whether the block metadata is fully specified, i.e. layout can
    /// be resolved.
    #[inline]
    pub const fn is_specified(&self) -> bool {
        self.block_size[0] != 0
            && self.block_size[1] != 0
            && self.block_size[2] != 0
            && self.block_data_size != 0
    }

    /// Computes offsets, strides and the required total size for a
    /// compressed image of the given dimensions.
    ///
    /// Pixel counts are rounded up to whole blocks; the row stride is
    /// the block count of the effective row length times the block data
    /// size. Returns `None` when the block metadata is unspecified, in
    /// which case layout (and buffer size validation) is unavailable.
    /// If any size component is zero the result is all zeros.
    ///
    /// # Panics
    ///
    /// If any size component is negative.
    pub fn data_properties(&self, size: [i32; 3]) -> Option<DataProperties> {
        assert!(
            size.iter().all(|&component| component >= 0),
            "image size {size:?} can't be negative"
        );
        if !self.is_specified() {
            return None;
        }
        if size.iter().any(|&component| component == 0) {
            return Some(DataProperties::default());
        }

        let block_data_size = self.block_data_size as usize;
        let block_count = |pixels: i32, dimension: usize| {
            (pixels as usize).div_ceil(self.block_size[dimension] as usize)
        };
        let row_length = if self.row_length != 0 {
            self.row_length
        } else {
            size[0]
        };
        let row_stride = block_count(row_length, 0) * block_data_size;
        let rows = block_count(size[1], 1);
        let slices = block_count(size[2], 2);

        let offset = [
            block_count(self.skip[0], 0) * block_data_size,
            block_count(self.skip[1], 1) * row_stride,
            block_count(self.skip[2], 2) * row_stride * rows,
        ];
        let total = offset.iter().sum::<usize>() + row_stride * rows * slices;
        Some(DataProperties {
            offset,
            size: [row_stride, rows, slices],
            total,
        })
    }
}

/// Pads a D-dimensional size to three components, filling the missing
/// trailing dimensions with 1.
pub(crate) fn pad_size<const D: usize>(size: [i32; D]) -> [i32; 3] {
    const {
        assert!(D >= 1 && D <= 3, "only 1D, 2D and 3D images are supported");
    }
    let mut padded = [1; 3];
    padded[..D].copy_from_slice(&size);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let storage = PixelStorage::default();
        assert_eq!(storage.alignment(), 4);
        assert_eq!(storage.row_length(), 0);
        assert_eq!(storage.skip(), [0; 3]);
    }

    #[test]
    fn test_tight_layout() {
        // 3-byte pixels, alignment 1: no padding anywhere.
        let props = PixelStorage::default()
            .with_alignment(1)
            .data_properties(3, [5, 8, 2]);
        assert_eq!(props.offset, [0; 3]);
        assert_eq!(props.size, [15, 8, 2]);
        assert_eq!(props.total, 15 * 8 * 2);
    }

    #[test]
    fn test_row_alignment() {
        // 15-byte rows rounded up to the default 4-byte alignment.
        let props = PixelStorage::default().data_properties(3, [5, 8, 1]);
        assert_eq!(props.size, [16, 8, 1]);
        assert_eq!(props.total, 16 * 8);
    }

    #[test]
    fn test_skip_offsets() {
        let props = PixelStorage::default()
            .with_skip([25, 25, 0])
            .data_properties(4, [75, 50, 1]);
        // 75 px * 4 B = 300 B, already a multiple of 4.
        assert_eq!(props.size, [300, 50, 1]);
        assert_eq!(props.offset, [100, 7500, 0]);
        assert_eq!(props.total, 100 + 7500 + 300 * 50);
    }

    #[test]
    fn test_slice_skip() {
        let props = PixelStorage::default()
            .with_alignment(1)
            .with_skip([0, 0, 2])
            .data_properties(1, [4, 4, 3]);
        assert_eq!(props.offset, [0, 0, 2 * 4 * 4]);
        assert_eq!(props.total, 2 * 16 + 3 * 16);
    }

    #[test]
    fn test_row_length_override() {
        let props = PixelStorage::default()
            .with_row_length(128)
            .data_properties(4, [100, 100, 1]);
        assert_eq!(props.size, [512, 100, 1]);
        assert_eq!(props.total, 512 * 100);
    }

    #[test]
    fn test_zero_size() {
        let storage = PixelStorage::default().with_skip([25, 25, 0]);
        for size in [[0, 8, 1], [8, 0, 1], [8, 8, 0]] {
            assert_eq!(storage.data_properties(4, size), DataProperties::default());
        }
    }

    #[test]
    fn test_deterministic() {
        let storage = PixelStorage::default()
            .with_alignment(8)
            .with_row_length(13)
            .with_skip([1, 2, 3]);
        let first = storage.data_properties(3, [13, 7, 5]);
        assert_eq!(storage.data_properties(3, [13, 7, 5]), first);
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn test_invalid_alignment() {
        let _ = PixelStorage::default().with_alignment(3);
    }

    #[test]
    #[should_panic(expected = "image size [-4, 4, 1] can't be negative")]
    fn test_negative_size() {
        let _ = PixelStorage::default().data_properties(4, [-4, 4, 1]);
    }

    #[test]
    #[should_panic(expected = "skip [-1, 0, 0] can't be negative")]
    fn test_negative_skip() {
        let _ = PixelStorage::default().with_skip([-1, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "row length -8 can't be negative")]
    fn test_negative_row_length() {
        let _ = PixelStorage::default().with_row_length(-8);
    }

    #[test]
    fn test_compressed_unspecified() {
        let storage = CompressedPixelStorage::default();
        assert!(!storage.is_specified());
        assert_eq!(storage.data_properties([8, 8, 1]), None);

        // Partial metadata is still unspecified.
        let partial = CompressedPixelStorage::default().with_block_size([4, 4, 1]);
        assert_eq!(partial.data_properties([8, 8, 1]), None);
    }

    #[test]
    fn test_compressed_layout() {
        // BC1: 4x4 blocks, 8 bytes each.
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8);
        let props = storage.data_properties([12, 8, 1]).unwrap();
        assert_eq!(props.size, [3 * 8, 2, 1]);
        assert_eq!(props.total, 3 * 8 * 2);
    }

    #[test]
    fn test_compressed_partial_blocks() {
        // A 13x9 image occupies 4x3 whole 4x4 blocks.
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(16);
        let props = storage.data_properties([13, 9, 1]).unwrap();
        assert_eq!(props.size, [4 * 16, 3, 1]);
        assert_eq!(props.total, 4 * 16 * 3);
    }

    #[test]
    fn test_compressed_skip_and_row_length() {
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8)
            .with_row_length(16)
            .with_skip([8, 4, 0]);
        let props = storage.data_properties([8, 8, 1]).unwrap();
        // 16 px rows = 4 blocks of 8 bytes.
        assert_eq!(props.size, [32, 2, 1]);
        assert_eq!(props.offset, [2 * 8, 32, 0]);
        assert_eq!(props.total, 16 + 32 + 32 * 2);
    }

    #[test]
    fn test_compressed_zero_size() {
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8)
            .with_skip([4, 4, 0]);
        assert_eq!(
            storage.data_properties([0, 8, 1]).unwrap(),
            DataProperties::default()
        );
    }

    #[test]
    #[should_panic(expected = "image size [-8, 8, 1] can't be negative")]
    fn test_compressed_negative_size() {
        let storage = CompressedPixelStorage::default()
            .with_block_size([4, 4, 1])
            .with_block_data_size(8);
        let _ = storage.data_properties([-8, 8, 1]);
    }

    #[test]
    #[should_panic(expected = "block size [4, -4, 1] can't be negative")]
    fn test_compressed_negative_block_size() {
        let _ = CompressedPixelStorage::default().with_block_size([4, -4, 1]);
    }

    #[test]
    #[should_panic(expected = "block data size -8 can't be negative")]
    fn test_compressed_negative_block_data_size() {
        let _ = CompressedPixelStorage::default().with_block_data_size(-8);
    }

    #[test]
    fn test_pad_size() {
        assert_eq!(pad_size([7]), [7, 1, 1]);
        assert_eq!(pad_size([7, 3]), [7, 3, 1]);
        assert_eq!(pad_size([7, 3, 2]), [7, 3, 2]);
    }
}
