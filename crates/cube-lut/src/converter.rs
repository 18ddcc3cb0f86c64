//! Identity/effect cube converter.
//!
//! [`LutCubeConverter`] owns two cubes:
//!
//! - the *identity* cube, decoded once at construction and kept for the
//!   converter's lifetime (optionally shared through a [`CubeCache`]);
//! - the *effect* cube, rebuilt synchronously every time its locator
//!   changes.
//!
//! The blended output is computed on every read from the two cached cubes
//! and the current intensity. It is never cached.
//!
//! # Example
//!
//! ```rust
//! use cube_lut::{
//!     unpack, AtlasLayout, ColorCube, ConverterOptions, LutCubeConverter, MemoryDecoder,
//! };
//!
//! let layout = AtlasLayout::for_columns(4, 2).unwrap();
//! let identity = unpack(&ColorCube::identity(4), &layout).unwrap();
//! let effect = unpack(&ColorCube::filled(4, [1.0; 4]), &layout).unwrap();
//! let decoder = MemoryDecoder::new()
//!     .with("identity.png", identity)
//!     .with("warm.png", effect);
//!
//! let options = ConverterOptions::default().with_dimension(4);
//! let mut converter = LutCubeConverter::with_options("identity.png", decoder, options).unwrap();
//! assert!(converter.color_cube_data().is_none());
//!
//! converter.set_effect_locator(Some("warm.png")).unwrap();
//! converter.set_intensity(0.5);
//! let cube = converter.color_cube_data().unwrap();
//! assert_eq!(cube.as_bytes().len(), 4 * 4 * 4 * 4 * 4);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::interp::check_intensity;
use crate::packer::load_cube;
use crate::{blend, AtlasDecoder, ColorCube, CubeCache, LutError, LutResult, CUBE_DIMENSION};

/// Construction options for [`LutCubeConverter`].
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Cube dimension the atlases encode.
    pub dimension: usize,
    /// Initial blend intensity.
    pub intensity: f32,
    /// Shared identity cache.
    pub cache: Option<Arc<CubeCache>>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            dimension: CUBE_DIMENSION,
            intensity: 1.0,
            cache: None,
        }
    }
}

impl ConverterOptions {
    /// Sets the cube dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the initial intensity.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Shares identity cubes through `cache`.
    ///
    /// The cache is keyed by locator and dimension, so every converter using
    /// it must decode through equivalent decoders.
    pub fn with_cache(mut self, cache: Arc<CubeCache>) -> Self {
        self.cache = Some(cache);
        self
    }
}

/// State of the effect cube.
#[derive(Debug, Clone)]
enum Effect {
    Absent,
    Loaded { locator: PathBuf, cube: ColorCube },
    Failed { locator: PathBuf },
}

/// Produces colour cube data by blending an effect LUT over an identity LUT.
///
/// All operations run synchronously on the calling thread. Mutation takes
/// `&mut self`, so concurrent use must be serialised by the caller.
#[derive(Debug)]
pub struct LutCubeConverter<D> {
    decoder: D,
    dimension: usize,
    identity_locator: PathBuf,
    identity: Arc<ColorCube>,
    effect: Effect,
    intensity: f32,
}

impl<D: AtlasDecoder> LutCubeConverter<D> {
    /// Creates a converter for 64 cubes with intensity 1.
    ///
    /// The identity atlas is decoded immediately. Failure is returned as an
    /// error and no converter is created.
    pub fn new(identity_locator: impl Into<PathBuf>, decoder: D) -> LutResult<Self> {
        Self::with_options(identity_locator, decoder, ConverterOptions::default())
    }

    /// Creates a converter with explicit options.
    pub fn with_options(
        identity_locator: impl Into<PathBuf>,
        decoder: D,
        options: ConverterOptions,
    ) -> LutResult<Self> {
        let identity_locator = identity_locator.into();
        let dimension = options.dimension;

        let identity = match &options.cache {
            Some(cache) => cache.get_or_load(&identity_locator, dimension, || {
                load_cube(&decoder, &identity_locator, dimension)
            })?,
            None => Arc::new(load_cube(&decoder, &identity_locator, dimension)?),
        };

        debug!(
            locator = %identity_locator.display(),
            dimension,
            "identity cube ready"
        );

        Ok(Self {
            decoder,
            dimension,
            identity_locator,
            identity,
            effect: Effect::Absent,
            intensity: options.intensity,
        })
    }

    /// Sets or clears the effect LUT.
    ///
    /// A new locator is decoded and packed before this returns, replacing any
    /// previous effect cube. On failure the effect is left unset and later
    /// reads fail until a valid effect is set. `None` clears the effect.
    pub fn set_effect_locator<P: Into<PathBuf>>(&mut self, locator: Option<P>) -> LutResult<()> {
        let Some(locator) = locator else {
            self.effect = Effect::Absent;
            return Ok(());
        };
        let locator: PathBuf = locator.into();

        match load_cube(&self.decoder, &locator, self.dimension) {
            Ok(cube) => {
                debug!(locator = %locator.display(), "effect cube ready");
                self.effect = Effect::Loaded { locator, cube };
                Ok(())
            }
            Err(e) => {
                warn!(locator = %locator.display(), error = %e, "effect cube failed to load");
                self.effect = Effect::Failed { locator };
                Err(e)
            }
        }
    }

    /// Decodes a single LUT with this converter's decoder, without blending.
    pub fn load_cube(&self, locator: &Path) -> LutResult<ColorCube> {
        load_cube(&self.decoder, locator, self.dimension)
    }
}

impl<D> LutCubeConverter<D> {
    /// Locator of the current effect, loaded or failed.
    pub fn effect_locator(&self) -> Option<&Path> {
        match &self.effect {
            Effect::Absent => None,
            Effect::Loaded { locator, .. } | Effect::Failed { locator } => Some(locator.as_path()),
        }
    }

    /// The loaded effect cube.
    pub fn effect_cube(&self) -> Option<&ColorCube> {
        match &self.effect {
            Effect::Loaded { cube, .. } => Some(cube),
            _ => None,
        }
    }

    /// Returns true if the last effect locator failed to load.
    pub fn effect_failed(&self) -> bool {
        matches!(self.effect, Effect::Failed { .. })
    }

    /// Locator of the identity LUT.
    pub fn identity_locator(&self) -> &Path {
        &self.identity_locator
    }

    /// The identity cube.
    pub fn identity_cube(&self) -> &ColorCube {
        &self.identity
    }

    /// Cube dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Current blend intensity.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the blend intensity.
    ///
    /// The value is stored as given; reads fail while it is outside `[0, 1]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Blends identity and effect at the current intensity.
    ///
    /// Recomputed on every call. The result is 4 MiB for a 64 cube, so
    /// callers that read repeatedly should keep it.
    pub fn try_color_cube_data(&self) -> LutResult<ColorCube> {
        check_intensity(self.intensity)?;
        let effect = self.effect_cube().ok_or(LutError::MissingEffect)?;
        blend(&self.identity, effect, self.intensity)
    }

    /// [`try_color_cube_data`](Self::try_color_cube_data) with failures
    /// reported as `None`, meaning "apply no colour effect".
    pub fn color_cube_data(&self) -> Option<ColorCube> {
        match self.try_color_cube_data() {
            Ok(cube) => Some(cube),
            Err(e) => {
                debug!(error = %e, "no colour cube data");
                None
            }
        }
    }
}
