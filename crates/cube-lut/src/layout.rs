//! Tiling geometry of a packed LUT atlas.
//!
//! An atlas stores a cube of dimension `N` as a grid of `N x N` tiles, one
//! tile per z-slice. The grid must hold exactly `N` tiles.

use crate::{LutError, LutResult};

/// Validated tile grid of an atlas image.
///
/// # Example
///
/// ```rust
/// use cube_lut::AtlasLayout;
///
/// let layout = AtlasLayout::new(512, 512, 64).unwrap();
/// assert_eq!(layout.row_count, 8);
/// assert_eq!(layout.column_count, 8);
///
/// assert!(AtlasLayout::new(500, 512, 64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
    /// Cube dimension (tile edge length).
    pub dimension: usize,
    /// Number of tile rows (`height / dimension`).
    pub row_count: usize,
    /// Number of tile columns (`width / dimension`).
    pub column_count: usize,
}

impl AtlasLayout {
    /// Derives the layout of a `width x height` atlas for cube `dimension`.
    ///
    /// Fails with [`LutError::InvalidAtlasDimensions`] unless both sides are
    /// multiples of `dimension` and the grid holds exactly `dimension` tiles.
    pub fn new(width: u32, height: u32, dimension: usize) -> LutResult<Self> {
        let invalid = || LutError::InvalidAtlasDimensions {
            width,
            height,
            dimension,
        };

        if dimension == 0 {
            return Err(invalid());
        }

        let (w, h) = (width as usize, height as usize);
        if w % dimension != 0 || h % dimension != 0 {
            return Err(invalid());
        }

        let layout = Self {
            width,
            height,
            dimension,
            row_count: h / dimension,
            column_count: w / dimension,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that the fields describe a consistent grid.
    ///
    /// Layouts built with [`new`](Self::new) always pass. Packing calls this
    /// first, so a hand-assembled layout fails with
    /// [`LutError::InvalidAtlasDimensions`] instead of indexing out of bounds.
    pub fn validate(&self) -> LutResult<()> {
        let n = self.dimension;
        let consistent = n != 0
            && self.column_count.checked_mul(n) == Some(self.width as usize)
            && self.row_count.checked_mul(n) == Some(self.height as usize)
            && self.row_count.checked_mul(self.column_count) == Some(n);
        if consistent {
            Ok(())
        } else {
            Err(LutError::InvalidAtlasDimensions {
                width: self.width,
                height: self.height,
                dimension: n,
            })
        }
    }

    /// Builds the layout with `column_count` tile columns.
    ///
    /// Used when encoding a cube back into an atlas. `column_count` must
    /// divide `dimension`.
    pub fn for_columns(dimension: usize, column_count: usize) -> LutResult<Self> {
        let side = |tiles: usize| {
            tiles
                .checked_mul(dimension)
                .and_then(|px| u32::try_from(px).ok())
        };
        let invalid = || LutError::InvalidAtlasDimensions {
            width: side(column_count).unwrap_or(u32::MAX),
            height: 0,
            dimension,
        };

        if column_count == 0 || dimension % column_count != 0 {
            return Err(invalid());
        }
        let row_count = dimension / column_count;
        match (side(column_count), side(row_count)) {
            (Some(width), Some(height)) => Self::new(width, height, dimension),
            _ => Err(invalid()),
        }
    }

    /// Number of tiles in the grid. Always equals `dimension`.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.row_count * self.column_count
    }

    /// Length in bytes of an RGBA8 buffer covering this atlas.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Tile `(row, col)` that stores cube slice `z`.
    ///
    /// # Panics
    ///
    /// Panics if `column_count` is zero, which [`validate`](Self::validate)
    /// rejects.
    #[inline]
    pub fn tile_of_slice(&self, z: usize) -> (usize, usize) {
        (z / self.column_count, z % self.column_count)
    }

    /// Cube slice stored in tile `(row, col)`.
    #[inline]
    pub fn slice_of_tile(&self, row: usize, col: usize) -> usize {
        row * self.column_count + col
    }
}
