//! Atlas decoding capability.
//!
//! The engine does not decode image files itself. Anything that can turn a
//! resource locator into an RGBA8 pixel grid implements [`AtlasDecoder`];
//! `cube-io` provides PNG and generic image backends.
//!
//! # Example
//!
//! ```rust
//! use cube_lut::{AtlasDecoder, AtlasImage, MemoryDecoder};
//! use std::path::Path;
//!
//! let mut decoder = MemoryDecoder::new();
//! decoder.insert("identity.png", AtlasImage::new(2, 2, vec![0; 16]).unwrap());
//!
//! let atlas = decoder.decode(Path::new("identity.png")).unwrap();
//! assert_eq!(atlas.width, 2);
//! assert!(decoder.decode(Path::new("missing.png")).is_err());
//! ```

use crate::{LutError, LutResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Decoded atlas pixels: RGBA8, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl AtlasImage {
    /// Wraps an RGBA8 buffer, checking its length against the geometry.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> LutResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(LutError::PixelBufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Turns a resource locator into atlas pixels.
///
/// Implementations report unreadable or corrupt resources as
/// [`LutError::DecodeFailure`].
pub trait AtlasDecoder {
    /// Decodes the atlas at `locator`.
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage>;
}

impl<T: AtlasDecoder + ?Sized> AtlasDecoder for &T {
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage> {
        (**self).decode(locator)
    }
}

impl<T: AtlasDecoder + ?Sized> AtlasDecoder for Arc<T> {
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage> {
        (**self).decode(locator)
    }
}

impl<T: AtlasDecoder + ?Sized> AtlasDecoder for Box<T> {
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage> {
        (**self).decode(locator)
    }
}

/// Decoder over atlases already held in memory.
///
/// Useful for bundled assets and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDecoder {
    atlases: HashMap<PathBuf, AtlasImage>,
}

impl MemoryDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `atlas` under `locator`, replacing any previous entry.
    pub fn insert(&mut self, locator: impl Into<PathBuf>, atlas: AtlasImage) {
        self.atlases.insert(locator.into(), atlas);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, locator: impl Into<PathBuf>, atlas: AtlasImage) -> Self {
        self.insert(locator, atlas);
        self
    }

    /// Number of registered atlases.
    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }
}

impl AtlasDecoder for MemoryDecoder {
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage> {
        self.atlases
            .get(locator)
            .cloned()
            .ok_or_else(|| LutError::decode(locator, "resource not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_image_length() {
        assert!(AtlasImage::new(4, 2, vec![0; 32]).is_ok());
        let err = AtlasImage::new(4, 2, vec![0; 31]).unwrap_err();
        assert!(matches!(err, LutError::PixelBufferSize { expected: 32, actual: 31 }));
    }

    #[test]
    fn test_memory_decoder() {
        let atlas = AtlasImage::new(1, 1, vec![9, 9, 9, 255]).unwrap();
        let decoder = MemoryDecoder::new().with("a.png", atlas.clone());
        assert_eq!(decoder.len(), 1);
        assert_eq!(decoder.decode(Path::new("a.png")).unwrap(), atlas);

        let err = decoder.decode(Path::new("b.png")).unwrap_err();
        assert!(matches!(err, LutError::DecodeFailure { .. }));
        assert!(MemoryDecoder::new().is_empty());
    }

    #[test]
    fn test_decoder_through_arc() {
        let decoder = Arc::new(
            MemoryDecoder::new().with("a.png", AtlasImage::new(1, 1, vec![0; 4]).unwrap()),
        );
        let shared: Arc<dyn AtlasDecoder> = decoder.clone();
        assert!(shared.decode(Path::new("a.png")).is_ok());
        assert!((&*decoder).decode(Path::new("a.png")).is_ok());
    }
}
