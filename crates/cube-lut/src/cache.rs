//! Shared identity cube cache.
//!
//! Converters that use the same identity atlas can share one decoded cube
//! by injecting the same [`CubeCache`]. Entries are immutable and handed
//! out as `Arc<ColorCube>`.
//!
//! Entries are keyed by locator and dimension only, so a cache belongs to
//! one decoder. Converters whose decoders resolve the same locator to
//! different atlases need separate caches.
//!
//! ```rust
//! use cube_lut::{ColorCube, CubeCache};
//! use std::path::Path;
//!
//! let cache = CubeCache::new();
//! let path = Path::new("identity.png");
//! let a = cache.get_or_load(path, 4, || Ok(ColorCube::identity(4))).unwrap();
//! let b = cache.get_or_load(path, 4, || unreachable!()).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::{ColorCube, LutResult};

/// Cache key: resource locator plus cube dimension.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    locator: PathBuf,
    dimension: usize,
}

/// Thread-safe cache of decoded cubes.
///
/// The first cube loaded for a `(locator, dimension)` pair is returned to
/// every later caller, whichever decoder they use.
#[derive(Debug, Default)]
pub struct CubeCache {
    cubes: RwLock<HashMap<CacheKey, Arc<ColorCube>>>,
}

impl CubeCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached cube for `(locator, dimension)`, or builds it with
    /// `load` and caches it.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load<F>(
        &self,
        locator: &Path,
        dimension: usize,
        load: F,
    ) -> LutResult<Arc<ColorCube>>
    where
        F: FnOnce() -> LutResult<ColorCube>,
    {
        if let Some(cube) = self.get(locator, dimension) {
            debug!(locator = %locator.display(), "cube cache hit");
            return Ok(cube);
        }

        debug!(locator = %locator.display(), "cube cache miss");
        let cube = Arc::new(load()?);

        let key = CacheKey {
            locator: locator.to_path_buf(),
            dimension,
        };
        // Another thread may have filled the slot meanwhile; keep the first.
        let mut cubes = self.cubes.write().unwrap_or_else(|e| e.into_inner());
        Ok(cubes.entry(key).or_insert(cube).clone())
    }

    /// Cached cube for `(locator, dimension)`, if any.
    pub fn get(&self, locator: &Path, dimension: usize) -> Option<Arc<ColorCube>> {
        let key = CacheKey {
            locator: locator.to_path_buf(),
            dimension,
        };
        let cubes = self.cubes.read().unwrap_or_else(|e| e.into_inner());
        cubes.get(&key).cloned()
    }

    /// Drops every cached cube.
    pub fn clear(&self) {
        self.cubes.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Number of cached cubes.
    pub fn len(&self) -> usize {
        self.cubes.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns true when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LutError;
    use std::thread;

    #[test]
    fn cache_hit() {
        let cache = CubeCache::new();
        assert!(cache.is_empty());

        let a = cache
            .get_or_load(Path::new("id.png"), 4, || Ok(ColorCube::identity(4)))
            .unwrap();
        assert_eq!(cache.len(), 1);

        let b = cache
            .get_or_load(Path::new("id.png"), 4, || panic!("should hit"))
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        // Different dimension is a different entry
        cache
            .get_or_load(Path::new("id.png"), 2, || Ok(ColorCube::identity(2)))
            .unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_load_not_cached() {
        let cache = CubeCache::new();
        let err = cache
            .get_or_load(Path::new("bad.png"), 4, || Err(LutError::decode("bad.png", "corrupt")))
            .unwrap_err();
        assert!(matches!(err, LutError::DecodeFailure { .. }));
        assert!(cache.is_empty());
        assert!(cache.get(Path::new("bad.png"), 4).is_none());
    }

    #[test]
    fn cache_clear() {
        let cache = CubeCache::new();
        cache
            .get_or_load(Path::new("id.png"), 2, || Ok(ColorCube::identity(2)))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn thread_safe() {
        let cache = Arc::new(CubeCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache
                        .get_or_load(Path::new("id.png"), 8, || Ok(ColorCube::identity(8)))
                        .unwrap()
                })
            })
            .collect();

        let cubes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(cache.len(), 1);
        let first = cache.get(Path::new("id.png"), 8).unwrap();
        assert!(cubes.iter().all(|c| Arc::ptr_eq(c, &first)));
    }
}
