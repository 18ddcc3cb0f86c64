//! Colour cube error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for colour cube operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building or blending colour cubes.
#[derive(Debug, Error)]
pub enum LutError {
    /// Atlas geometry does not factor into `dimension` square tiles.
    #[error("invalid atlas dimensions {width}x{height} for cube dimension {dimension}")]
    InvalidAtlasDimensions {
        /// Atlas width in pixels.
        width: u32,
        /// Atlas height in pixels.
        height: u32,
        /// Cube dimension the atlas was checked against.
        dimension: usize,
    },

    /// The atlas resource could not be read or decoded.
    #[error("failed to decode {}: {reason}", .locator.display())]
    DecodeFailure {
        /// Resource that failed to decode.
        locator: PathBuf,
        /// Underlying decoder message.
        reason: String,
    },

    /// Identity and effect cubes have different lengths.
    #[error("cube size mismatch: identity has {identity} values, effect has {effect}")]
    CubeSizeMismatch {
        /// Identity cube length.
        identity: usize,
        /// Effect cube length.
        effect: usize,
    },

    /// Blend intensity outside `[0, 1]`.
    #[error("invalid intensity {0}, expected a value in [0, 1]")]
    InvalidIntensity(f32),

    /// Pixel buffer length does not match the atlas geometry.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferSize {
        /// Bytes required by `width * height * 4`.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// Raw cube data has the wrong number of values.
    #[error("cube data holds {actual} values, expected {expected}")]
    InvalidCubeLength {
        /// Values required by `dimension^3 * 4`.
        expected: usize,
        /// Values actually supplied.
        actual: usize,
    },

    /// A blended read was requested without a loaded effect cube.
    #[error("no effect cube loaded")]
    MissingEffect,
}

impl LutError {
    /// Builds a [`LutError::DecodeFailure`] for `locator`.
    pub fn decode(locator: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DecodeFailure {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}
