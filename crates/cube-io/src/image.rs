//! Atlas decoding through the `image` crate.
//!
//! Handles every format `image` was built with. Pixels are converted with
//! `to_rgba8`, so higher bit depths are quantised to 8 bits.

use std::path::Path;

use cube_lut::{AtlasDecoder, AtlasImage, LutResult};
use tracing::debug;

use crate::{AtlasIoError, AtlasIoResult};

/// [`AtlasDecoder`] backed by [`image::open`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageAtlasDecoder;

impl ImageAtlasDecoder {
    /// Creates the decoder.
    pub fn new() -> Self {
        Self
    }
}

impl AtlasDecoder for ImageAtlasDecoder {
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage> {
        read_image_atlas(locator).map_err(|e| e.into_lut_error(locator))
    }
}

/// Reads an atlas in any supported format from `path`.
pub fn read_image_atlas<P: AsRef<Path>>(path: P) -> AtlasIoResult<AtlasImage> {
    let img = image::open(path.as_ref()).map_err(|e| AtlasIoError::DecodeError(e.to_string()))?;
    debug!(path = %path.as_ref().display(), color = ?img.color(), "read image atlas");
    from_dynamic(img)
}

/// Decodes an atlas held in memory, guessing the format from its contents.
pub fn decode_image_atlas(data: &[u8]) -> AtlasIoResult<AtlasImage> {
    let img = image::load_from_memory(data).map_err(|e| AtlasIoError::DecodeError(e.to_string()))?;
    from_dynamic(img)
}

fn from_dynamic(img: image::DynamicImage) -> AtlasIoResult<AtlasImage> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(AtlasImage::new(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_png_bytes() {
        let atlas = AtlasImage::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let bytes = crate::encode_png_atlas(&atlas).unwrap();
        assert_eq!(decode_image_atlas(&bytes).unwrap(), atlas);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            decode_image_atlas(&[0u8; 8]),
            Err(AtlasIoError::DecodeError(_))
        ));
    }
}
