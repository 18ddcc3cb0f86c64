//! Linear blending between two colour cubes.
//!
//! `out[i] = identity[i] + (effect[i] - identity[i]) * intensity`

use crate::{ColorCube, LutError, LutResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
const CHUNK: usize = 16 * 1024;

/// Blends `identity` toward `effect` by `intensity`.
///
/// Intensity outside `[0, 1]` (or NaN) is rejected, not clamped.
///
/// # Example
///
/// ```rust
/// use cube_lut::{blend, ColorCube};
///
/// let identity = ColorCube::filled(4, [0.0; 4]);
/// let effect = ColorCube::filled(4, [1.0; 4]);
/// let half = blend(&identity, &effect, 0.5).unwrap();
/// assert!(half.as_slice().iter().all(|&v| v == 0.5));
///
/// assert!(blend(&identity, &effect, 1.5).is_err());
/// ```
pub fn blend(identity: &ColorCube, effect: &ColorCube, intensity: f32) -> LutResult<ColorCube> {
    let mut out = vec![0.0f32; identity.len()];
    blend_into(&mut out, identity.as_slice(), effect.as_slice(), intensity)?;
    ColorCube::from_data(out, identity.dimension())
}

/// Slice form of [`blend`], writing into caller-owned `out`.
///
/// All three slices must have the same length.
pub fn blend_into(
    out: &mut [f32],
    identity: &[f32],
    effect: &[f32],
    intensity: f32,
) -> LutResult<()> {
    check_intensity(intensity)?;
    if identity.len() != effect.len() {
        return Err(LutError::CubeSizeMismatch {
            identity: identity.len(),
            effect: effect.len(),
        });
    }
    if out.len() != identity.len() {
        return Err(LutError::InvalidCubeLength {
            expected: identity.len(),
            actual: out.len(),
        });
    }

    lerp(out, identity, effect, intensity);
    Ok(())
}

/// Fails with [`LutError::InvalidIntensity`] unless `0 <= intensity <= 1`.
#[inline]
pub fn check_intensity(intensity: f32) -> LutResult<()> {
    if (0.0..=1.0).contains(&intensity) {
        Ok(())
    } else {
        Err(LutError::InvalidIntensity(intensity))
    }
}

#[cfg(not(feature = "parallel"))]
fn lerp(out: &mut [f32], a: &[f32], b: &[f32], t: f32) {
    for ((o, &a), &b) in out.iter_mut().zip(a).zip(b) {
        *o = a + (b - a) * t;
    }
}

#[cfg(feature = "parallel")]
fn lerp(out: &mut [f32], a: &[f32], b: &[f32], t: f32) {
    out.par_chunks_mut(CHUNK)
        .zip(a.par_chunks(CHUNK))
        .zip(b.par_chunks(CHUNK))
        .for_each(|((o, a), b)| {
            for ((o, &a), &b) in o.iter_mut().zip(a).zip(b) {
                *o = a + (b - a) * t;
            }
        });
}
