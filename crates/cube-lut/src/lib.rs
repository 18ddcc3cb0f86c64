//! # cube-lut
//!
//! Colour cube construction and blending for atlas-encoded 3D LUTs.
//!
//! A LUT atlas is a 2D image holding a 3D colour cube as a grid of square
//! tiles, one tile per z-slice. This crate validates the atlas geometry,
//! packs the pixels into a flat RGBA float cube, and blends an effect cube
//! over an identity cube by an intensity factor. The resulting buffer is
//! what colour-cube filter operators consume.
//!
//! # Components
//!
//! - [`AtlasLayout`] - tile grid validation
//! - [`pack`] / [`unpack`] - atlas to cube and back
//! - [`blend`] - linear interpolation between two cubes
//! - [`LutCubeConverter`] - identity + effect + intensity facade
//! - [`CubeCache`] - shared identity cubes across converters
//!
//! Image decoding is supplied through [`AtlasDecoder`]; see `cube-io` for
//! PNG support.
//!
//! # Usage
//!
//! ```rust
//! use cube_lut::{blend, pack_atlas, unpack, AtlasLayout, ColorCube};
//!
//! let layout = AtlasLayout::new(512, 512, 64).unwrap();
//! let atlas = unpack(&ColorCube::identity(64), &layout).unwrap();
//!
//! let identity = pack_atlas(&atlas, 64).unwrap();
//! let effect = ColorCube::filled(64, [1.0, 0.5, 0.0, 1.0]);
//! let graded = blend(&identity, &effect, 0.3).unwrap();
//! assert_eq!(graded.as_bytes().len(), 4_194_304);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Diagnostics
//! - [`bytemuck`] - Zero-copy wire view of cube data
//! - `rayon` - Parallel blending (`parallel` feature)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod converter;
mod cube;
mod decode;
mod error;
mod interp;
mod layout;
mod packer;

pub use cache::CubeCache;
pub use converter::{ConverterOptions, LutCubeConverter};
pub use cube::{value_count, ColorCube, CHANNELS, CUBE_DIMENSION};
pub use decode::{AtlasDecoder, AtlasImage, MemoryDecoder};
pub use error::{LutError, LutResult};
pub use interp::{blend, blend_into, check_intensity};
pub use layout::AtlasLayout;
pub use packer::{load_cube, pack, pack_atlas, unpack};
