//! # cube-io
//!
//! Atlas decoders for [`cube_lut`].
//!
//! [`cube_lut::LutCubeConverter`] takes its atlases through the
//! [`cube_lut::AtlasDecoder`] trait. This crate implements it on top of
//! real codecs:
//!
//! - [`PngAtlasDecoder`] - PNG via the `png` crate (always available)
//! - `ImageAtlasDecoder` - any `image` crate format (`image` feature)
//!
//! It also writes atlases back to PNG, which is how identity atlases are
//! authored from [`cube_lut::ColorCube::identity`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cube_io::PngAtlasDecoder;
//! use cube_lut::LutCubeConverter;
//!
//! let mut converter = LutCubeConverter::new("identity.png", PngAtlasDecoder::new())?;
//! converter.set_effect_locator(Some("film.png"))?;
//! converter.set_intensity(0.8);
//! let bytes = converter.color_cube_data().map(|cube| cube.to_ne_bytes());
//! ```

#![warn(missing_docs)]

mod error;
pub mod png;

#[cfg(feature = "image")]
pub mod image;

pub use error::{AtlasIoError, AtlasIoResult};
pub use self::png::{
    decode_png_atlas, encode_png_atlas, read_png_atlas, write_png_atlas, PngAtlasDecoder,
};

#[cfg(feature = "image")]
pub use self::image::{decode_image_atlas, read_image_atlas, ImageAtlasDecoder};
