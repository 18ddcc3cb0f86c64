//! Flat RGBA colour cube.

use crate::{LutError, LutResult};

/// Cube dimension used by atlas LUTs.
pub const CUBE_DIMENSION: usize = 64;

/// Number of channels per cube cell (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A 3D colour lookup table stored as interleaved RGBA floats.
///
/// # Layout
///
/// - `dimension^3` cells, 4 channels each
/// - `x` varies fastest, then `y`, then `z`
/// - cell `(x, y, z)` channel `c` lives at `((z*N*N + y*N + x) * 4) + c`
///
/// This is the buffer layout expected by colour-cube filter operators.
///
/// # Example
///
/// ```rust
/// use cube_lut::ColorCube;
///
/// let cube = ColorCube::identity(4);
/// assert_eq!(cube.len(), 4 * 4 * 4 * 4);
/// assert_eq!(cube.get(3, 0, 0), [1.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCube {
    data: Vec<f32>,
    dimension: usize,
}

impl ColorCube {
    /// Wraps raw cube data.
    ///
    /// `data` must hold exactly `dimension^3 * 4` values.
    pub fn from_data(data: Vec<f32>, dimension: usize) -> LutResult<Self> {
        let expected = value_count(dimension);
        if data.len() != expected {
            return Err(LutError::InvalidCubeLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, dimension })
    }

    /// Creates the no-op cube: cell `(x, y, z)` maps to itself.
    ///
    /// `x` drives red, `y` green and `z` blue. Alpha is 1.
    pub fn identity(dimension: usize) -> Self {
        let mut data = Vec::with_capacity(value_count(dimension));
        let max = dimension.saturating_sub(1).max(1) as f32;

        for z in 0..dimension {
            for y in 0..dimension {
                for x in 0..dimension {
                    data.extend_from_slice(&[
                        x as f32 / max,
                        y as f32 / max,
                        z as f32 / max,
                        1.0,
                    ]);
                }
            }
        }

        Self { data, dimension }
    }

    /// Creates a cube where every cell holds `rgba`.
    pub fn filled(dimension: usize, rgba: [f32; 4]) -> Self {
        let cells = dimension * dimension * dimension;
        let mut data = Vec::with_capacity(cells * CHANNELS);
        for _ in 0..cells {
            data.extend_from_slice(&rgba);
        }
        Self { data, dimension }
    }

    /// Cube edge length.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of float values (`dimension^3 * 4`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-dimension cube.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of channel 0 of cell `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        let n = self.dimension;
        (z * n * n + y * n + x) * CHANNELS
    }

    /// RGBA value of cell `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= dimension`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> [f32; 4] {
        let n = self.dimension;
        assert!(x < n && y < n && z < n, "cell ({x}, {y}, {z}) outside cube of size {n}");
        let i = self.index(x, y, z);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// The flat float values.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Wire view of the cube: native-endian `f32` bytes in cell order.
    ///
    /// For a 64 cube this is 4,194,304 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Owned copy of [`as_bytes`](Self::as_bytes).
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// Number of float values in a cube of `dimension`.
#[inline]
pub fn value_count(dimension: usize) -> usize {
    dimension * dimension * dimension * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_checks_length() {
        assert!(ColorCube::from_data(vec![0.0; 2 * 2 * 2 * 4], 2).is_ok());
        let err = ColorCube::from_data(vec![0.0; 31], 2).unwrap_err();
        assert!(matches!(err, LutError::InvalidCubeLength { expected: 32, actual: 31 }));
    }

    #[test]
    fn test_identity_corners() {
        let cube = ColorCube::identity(CUBE_DIMENSION);
        assert_eq!(cube.len(), 64 * 64 * 64 * 4);
        assert_eq!(cube.get(0, 0, 0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cube.get(63, 63, 63), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(cube.get(63, 0, 0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(cube.get(0, 63, 0), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(cube.get(0, 0, 63), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_index_formula() {
        let cube = ColorCube::identity(8);
        assert_eq!(cube.index(1, 0, 0), 4);
        assert_eq!(cube.index(0, 1, 0), 8 * 4);
        assert_eq!(cube.index(0, 0, 1), 8 * 8 * 4);
        assert_eq!(cube.index(3, 5, 7), (7 * 64 + 5 * 8 + 3) * 4);
    }

    #[test]
    fn test_wire_size() {
        let cube = ColorCube::filled(CUBE_DIMENSION, [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(cube.as_bytes().len(), 4_194_304);
        assert_eq!(&cube.as_bytes()[..4], &0.25f32.to_ne_bytes());
        assert_eq!(&cube.as_bytes()[12..16], &1.0f32.to_ne_bytes());
        assert_eq!(cube.to_ne_bytes().len(), 4_194_304);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds() {
        ColorCube::identity(4).get(4, 0, 0);
    }
}
