//! Atlas to cube packing.
//!
//! An atlas is a `row_count x column_count` grid of `N x N` tiles. Tile
//! `(row, col)` holds cube slice `z = row * column_count + col`; within a
//! tile, pixel row is `y` and pixel column is `x`.
//!
//! The atlas is walked one horizontal pixel strip at a time: for each tile
//! row and each local `y`, the strip crosses every column tile and each
//! `N`-pixel run lands in slice `z`, row `y` of the cube.
//!
//! # Example
//!
//! ```rust
//! use cube_lut::{pack, unpack, AtlasLayout, ColorCube};
//!
//! let layout = AtlasLayout::for_columns(4, 2).unwrap();
//! let cube = ColorCube::identity(4);
//! let atlas = unpack(&cube, &layout).unwrap();
//! let back = pack(&atlas.pixels, &layout).unwrap();
//! assert_eq!(back.dimension(), 4);
//! ```

use std::path::Path;

use tracing::{debug, trace};

use crate::cube::{value_count, CHANNELS};
use crate::{AtlasDecoder, AtlasImage, AtlasLayout, ColorCube, LutError, LutResult};

/// Packs an RGBA8 atlas buffer into a normalised colour cube.
///
/// `pixels` must hold exactly `layout.byte_len()` bytes.
pub fn pack(pixels: &[u8], layout: &AtlasLayout) -> LutResult<ColorCube> {
    layout.validate()?;
    let expected = layout.byte_len();
    if pixels.len() != expected {
        return Err(LutError::PixelBufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    let n = layout.dimension;
    let width = layout.width as usize;
    let run = n * CHANNELS;
    let mut data = vec![0.0f32; value_count(n)];

    for row in 0..layout.row_count {
        for y in 0..n {
            for col in 0..layout.column_count {
                let z = layout.slice_of_tile(row, col);
                let src = ((row * n + y) * width + col * n) * CHANNELS;
                let dst = (z * n * n + y * n) * CHANNELS;

                let strip = &pixels[src..src + run];
                for (out, &byte) in data[dst..dst + run].iter_mut().zip(strip) {
                    *out = byte as f32 / 255.0;
                }
            }
        }
    }

    trace!(
        rows = layout.row_count,
        columns = layout.column_count,
        dimension = n,
        "packed atlas"
    );

    ColorCube::from_data(data, n)
}

/// Validates the atlas geometry for `dimension` and packs it.
pub fn pack_atlas(atlas: &AtlasImage, dimension: usize) -> LutResult<ColorCube> {
    let layout = AtlasLayout::new(atlas.width, atlas.height, dimension)?;
    pack(&atlas.pixels, &layout)
}

/// Decodes the atlas at `locator` and packs it into a cube.
///
/// This is the single-LUT path: no identity cube and no blending.
pub fn load_cube<D>(decoder: &D, locator: &Path, dimension: usize) -> LutResult<ColorCube>
where
    D: AtlasDecoder + ?Sized,
{
    let atlas = decoder.decode(locator)?;
    debug!(
        locator = %locator.display(),
        width = atlas.width,
        height = atlas.height,
        "decoded atlas"
    );
    pack_atlas(&atlas, dimension)
}

/// Encodes a cube into an atlas with the given layout.
///
/// Inverse of [`pack`]: slice `z` is written to tile
/// `(z / column_count, z % column_count)`. Values are clamped to `[0, 1]`
/// and rounded to 8 bits.
pub fn unpack(cube: &ColorCube, layout: &AtlasLayout) -> LutResult<AtlasImage> {
    layout.validate()?;
    if cube.dimension() != layout.dimension {
        return Err(LutError::InvalidCubeLength {
            expected: value_count(layout.dimension),
            actual: cube.len(),
        });
    }

    let n = layout.dimension;
    let width = layout.width as usize;
    let run = n * CHANNELS;
    let values = cube.as_slice();
    let mut pixels = vec![0u8; layout.byte_len()];

    for z in 0..layout.tile_count() {
        let (row, col) = layout.tile_of_slice(z);
        for y in 0..n {
            let src = (z * n * n + y * n) * CHANNELS;
            let dst = ((row * n + y) * width + col * n) * CHANNELS;

            for (out, &v) in pixels[dst..dst + run].iter_mut().zip(&values[src..src + run]) {
                *out = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }
    }

    AtlasImage::new(layout.width, layout.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryDecoder, CUBE_DIMENSION};
    use approx::assert_abs_diff_eq;

    /// Atlas where every pixel of the tile holding slice `z` is `color(z)`.
    fn solid_tiles(layout: &AtlasLayout, color: impl Fn(usize) -> [u8; 4]) -> Vec<u8> {
        let n = layout.dimension;
        let mut pixels = vec![0u8; layout.byte_len()];
        for py in 0..layout.height as usize {
            for px in 0..layout.width as usize {
                let z = layout.slice_of_tile(py / n, px / n);
                let i = (py * layout.width as usize + px) * 4;
                pixels[i..i + 4].copy_from_slice(&color(z));
            }
        }
        pixels
    }

    #[test]
    fn test_pack_512_square() {
        let layout = AtlasLayout::new(512, 512, CUBE_DIMENSION).unwrap();
        let pixels = vec![255u8; layout.byte_len()];
        let cube = pack(&pixels, &layout).unwrap();
        assert_eq!(cube.len(), 64 * 64 * 64 * 4);
        assert!(cube.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_pack_rejects_500_wide() {
        let atlas = AtlasImage::new(500, 512, vec![0; 500 * 512 * 4]).unwrap();
        let err = pack_atlas(&atlas, CUBE_DIMENSION).unwrap_err();
        assert!(matches!(err, LutError::InvalidAtlasDimensions { width: 500, .. }));
    }

    #[test]
    fn test_pack_rejects_short_buffer() {
        let layout = AtlasLayout::new(512, 512, CUBE_DIMENSION).unwrap();
        let err = pack(&[0u8; 16], &layout).unwrap_err();
        assert!(matches!(err, LutError::PixelBufferSize { actual: 16, .. }));
    }

    #[test]
    fn test_hand_built_layout_is_rejected() {
        let layout = AtlasLayout {
            width: 4,
            height: 4,
            dimension: 2,
            row_count: 2,
            column_count: 2,
        };
        let err = pack(&[0u8; 64], &layout).unwrap_err();
        assert!(matches!(err, LutError::InvalidAtlasDimensions { dimension: 2, .. }));

        let err = unpack(&ColorCube::identity(2), &layout).unwrap_err();
        assert!(matches!(err, LutError::InvalidAtlasDimensions { .. }));

        let empty = AtlasLayout {
            width: 0,
            height: 0,
            dimension: 0,
            row_count: 0,
            column_count: 0,
        };
        assert!(pack(&[], &empty).is_err());
    }

    #[test]
    fn test_solid_tiles_map_to_slices() {
        // Red channel encodes z as z * 4 (z / 64 scaled to a byte)
        let layout = AtlasLayout::new(512, 512, CUBE_DIMENSION).unwrap();
        let pixels = solid_tiles(&layout, |z| [(z * 4) as u8, 0, 0, 255]);
        let cube = pack(&pixels, &layout).unwrap();

        for z in 0..64 {
            let expected = (z * 4) as f32 / 255.0;
            for &(x, y) in &[(0, 0), (63, 0), (0, 63), (17, 42), (63, 63)] {
                let cell = cube.get(x, y, z);
                assert_abs_diff_eq!(cell[0], expected, epsilon = 1e-6);
                assert_eq!(cell[1], 0.0);
                assert_eq!(cell[2], 0.0);
                assert_eq!(cell[3], 1.0);
            }
        }
    }

    #[test]
    fn test_slice_order_in_wide_atlas() {
        // 16 columns x 4 rows: z must follow raster tile order
        let layout = AtlasLayout::new(1024, 256, CUBE_DIMENSION).unwrap();
        let pixels = solid_tiles(&layout, |z| [z as u8, (z / 16) as u8, (z % 16) as u8, 255]);
        let cube = pack(&pixels, &layout).unwrap();

        for z in 0..64 {
            let cell = cube.get(5, 9, z);
            assert_eq!((cell[0] * 255.0).round() as usize, z);
            assert_eq!((cell[1] * 255.0).round() as usize, z / 16);
            assert_eq!((cell[2] * 255.0).round() as usize, z % 16);
        }
    }

    #[test]
    fn test_local_pixel_maps_to_xy() {
        let layout = AtlasLayout::for_columns(4, 2).unwrap();
        let w = layout.width as usize;
        let mut pixels = vec![0u8; layout.byte_len()];
        // Tile (1, 0) is slice 2; mark its local pixel x=3, y=1
        let (px, py) = (3, 4 + 1);
        let i = (py * w + px) * 4;
        pixels[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);

        let cube = pack(&pixels, &layout).unwrap();
        assert_eq!(cube.get(3, 1, 2), [1.0, 1.0, 1.0, 1.0]);
        let lit = cube.as_slice().iter().filter(|&&v| v > 0.0).count();
        assert_eq!(lit, 4);
    }

    #[test]
    fn test_unpack_pack_roundtrip() {
        let layout = AtlasLayout::new(1024, 256, CUBE_DIMENSION).unwrap();
        let original = solid_tiles(&layout, |z| [(z * 3) as u8, 255 - z as u8, (z * 2) as u8, 255]);
        let cube = pack(&original, &layout).unwrap();
        let atlas = unpack(&cube, &layout).unwrap();
        assert_eq!(atlas.pixels, original);
    }

    #[test]
    fn test_unpack_rejects_dimension_mismatch() {
        let layout = AtlasLayout::for_columns(4, 2).unwrap();
        assert!(unpack(&ColorCube::identity(8), &layout).is_err());
    }

    #[test]
    fn test_load_cube() {
        let layout = AtlasLayout::for_columns(4, 2).unwrap();
        let atlas = unpack(&ColorCube::identity(4), &layout).unwrap();
        let decoder = MemoryDecoder::new().with("lut.png", atlas);

        let cube = load_cube(&decoder, Path::new("lut.png"), 4).unwrap();
        assert_eq!(cube.get(3, 3, 3), [1.0, 1.0, 1.0, 1.0]);

        let err = load_cube(&decoder, Path::new("other.png"), 4).unwrap_err();
        assert!(matches!(err, LutError::DecodeFailure { .. }));
        assert!(load_cube(&decoder, Path::new("lut.png"), 64).is_err());
    }
}
