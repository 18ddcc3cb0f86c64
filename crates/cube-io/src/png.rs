//! PNG atlas support.
//!
//! Reads any 8-bit or 16-bit PNG and expands it to RGBA8: palette and
//! low-bit images are expanded, 16-bit samples are stripped to their high
//! byte, grey is replicated across RGB and missing alpha becomes 255.
//! Atlases are written as 8-bit RGBA.
//!
//! # Example
//!
//! ```rust,ignore
//! use cube_io::png::{read_png_atlas, write_png_atlas};
//!
//! let atlas = read_png_atlas("identity.png")?;
//! write_png_atlas("copy.png", &atlas)?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;

use cube_lut::{AtlasDecoder, AtlasImage, LutResult};
use tracing::debug;

use crate::{AtlasIoError, AtlasIoResult};

/// [`AtlasDecoder`] reading PNG files from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngAtlasDecoder;

impl PngAtlasDecoder {
    /// Creates the decoder.
    pub fn new() -> Self {
        Self
    }
}

impl AtlasDecoder for PngAtlasDecoder {
    fn decode(&self, locator: &Path) -> LutResult<AtlasImage> {
        read_png_atlas(locator).map_err(|e| e.into_lut_error(locator))
    }
}

/// Reads a PNG atlas from `path`.
pub fn read_png_atlas<P: AsRef<Path>>(path: P) -> AtlasIoResult<AtlasImage> {
    let file = File::open(path.as_ref())?;
    let atlas = decode(BufReader::new(file))?;
    debug!(
        path = %path.as_ref().display(),
        width = atlas.width,
        height = atlas.height,
        "read PNG atlas"
    );
    Ok(atlas)
}

/// Decodes a PNG atlas held in memory.
pub fn decode_png_atlas(data: &[u8]) -> AtlasIoResult<AtlasImage> {
    decode(Cursor::new(data))
}

fn decode<R: BufRead + Seek>(reader: R) -> AtlasIoResult<AtlasImage> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| AtlasIoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| AtlasIoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| AtlasIoError::DecodeError(e.to_string()))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(AtlasIoError::UnsupportedLayout(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let samples = &buf[..info.buffer_size()];
    let pixels = to_rgba8(samples, info.color_type, info.width, info.line_size)?;
    Ok(AtlasImage::new(info.width, info.height, pixels)?)
}

/// Expands decoded 8-bit rows to tightly packed RGBA8.
fn to_rgba8(
    samples: &[u8],
    color_type: png::ColorType,
    width: u32,
    line_size: usize,
) -> AtlasIoResult<Vec<u8>> {
    let channels = match color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(AtlasIoError::UnsupportedLayout(format!("{:?}", other))),
    };
    let row_bytes = width as usize * channels;

    let mut rgba = Vec::with_capacity(samples.len() / channels.max(1) * 4);
    for line in samples.chunks(line_size) {
        for px in line[..row_bytes].chunks_exact(channels) {
            let pixel = match *px {
                [g] => [g, g, g, 255],
                [g, a] => [g, g, g, a],
                [r, g, b] => [r, g, b, 255],
                [r, g, b, a, ..] => [r, g, b, a],
                [] => [0, 0, 0, 255],
            };
            rgba.extend_from_slice(&pixel);
        }
    }
    Ok(rgba)
}

/// Writes `atlas` to `path` as an 8-bit RGBA PNG.
pub fn write_png_atlas<P: AsRef<Path>>(path: P, atlas: &AtlasImage) -> AtlasIoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(BufWriter::new(file), atlas)?;
    debug!(
        path = %path.as_ref().display(),
        width = atlas.width,
        height = atlas.height,
        "wrote PNG atlas"
    );
    Ok(())
}

/// Encodes `atlas` as PNG bytes.
pub fn encode_png_atlas(atlas: &AtlasImage) -> AtlasIoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut out, atlas)?;
    Ok(out)
}

fn encode<W: Write>(writer: W, atlas: &AtlasImage) -> AtlasIoResult<()> {
    let mut encoder = png::Encoder::new(writer, atlas.width, atlas.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| AtlasIoError::EncodeError(e.to_string()))?;

    png_writer
        .write_image_data(&atlas.pixels)
        .map_err(|e| AtlasIoError::EncodeError(e.to_string()))?;

    png_writer
        .finish()
        .map_err(|e| AtlasIoError::EncodeError(e.to_string()))?;

    Ok(())
}
