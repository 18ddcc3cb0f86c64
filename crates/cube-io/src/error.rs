//! Error types for atlas I/O.

use std::io;
use std::path::PathBuf;

use cube_lut::LutError;
use thiserror::Error;

/// Atlas I/O error.
#[derive(Debug, Error)]
pub enum AtlasIoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Pixel layout the atlas reader cannot expand to RGBA8.
    #[error("unsupported pixel layout: {0}")]
    UnsupportedLayout(String),

    /// Atlas buffer does not match its declared size.
    #[error("atlas error: {0}")]
    Atlas(#[from] LutError),
}

/// Result type for atlas I/O.
pub type AtlasIoResult<T> = Result<T, AtlasIoError>;

impl AtlasIoError {
    /// Converts into the engine's [`LutError::DecodeFailure`] for `locator`.
    ///
    /// Engine errors pass through unchanged.
    pub fn into_lut_error(self, locator: impl Into<PathBuf>) -> LutError {
        match self {
            AtlasIoError::Atlas(e) => e,
            other => LutError::decode(locator, other),
        }
    }
}
