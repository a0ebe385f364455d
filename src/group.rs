//! Cache Group Module
//!
//! A named cache that fills itself from a loader on every miss.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, CacheStore};
use crate::error::{CacheError, Result};

// == Loader ==
/// Produces the bytes for a key that is not cached yet.
///
/// Implemented for any `Fn(&str) -> anyhow::Result<Vec<u8>>` closure, so a plain
/// function can serve as a loader without a wrapper type.
pub trait Loader: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}

// == Group ==
/// A named, byte-bounded cache that loads missing keys on demand.
///
/// [`Group::get`] is cache-aside: a miss calls the loader outside of any cache
/// lock, then stores the result before returning it. Concurrent misses on the
/// same key each call the loader.
pub struct Group {
    name: String,
    loader: Box<dyn Loader>,
    main_cache: CacheStore,
    loads: AtomicU64,
    load_errors: AtomicU64,
}

impl Group {
    // == Constructor ==
    /// Creates a group holding at most `cache_bytes` bytes (0 = unbounded).
    pub fn new(
        name: impl Into<String>,
        cache_bytes: usize,
        loader: impl Loader + 'static,
    ) -> Self {
        Self::with_store(name.into(), CacheStore::new(cache_bytes), Box::new(loader))
    }

    /// Creates a group whose evicted entries are handed to `on_evicted`.
    pub fn with_eviction_listener<F>(
        name: impl Into<String>,
        cache_bytes: usize,
        loader: impl Loader + 'static,
        on_evicted: F,
    ) -> Self
    where
        F: FnMut(String, ByteView) + Send + 'static,
    {
        let store = CacheStore::with_eviction_listener(cache_bytes, on_evicted);
        Self::with_store(name.into(), store, Box::new(loader))
    }

    fn with_store(name: String, main_cache: CacheStore, loader: Box<dyn Loader>) -> Self {
        Self {
            name,
            loader,
            main_cache,
            loads: AtomicU64::new(0),
            load_errors: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Get ==
    /// Returns the cached value for `key`, loading and caching it on a miss.
    ///
    /// Loader errors are returned unchanged and leave the cache untouched.
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            debug!(group = %self.name, key, "Cache hit");
            return Ok(value);
        }

        self.load(key)
    }

    fn load(&self, key: &str) -> Result<ByteView> {
        debug!(group = %self.name, key, "Cache miss, loading");
        let bytes = match self.loader.load(key) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.load_errors.fetch_add(1, Ordering::Relaxed);
                warn!(group = %self.name, key, error = %err, "Loader failed");
                return Err(CacheError::Loader(err));
            }
        };
        self.loads.fetch_add(1, Ordering::Relaxed);

        let value = ByteView::new(&bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    // == Stats ==
    /// Returns the group's cache and loader figures.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.main_cache.stats();
        stats.loads = self.loads.load(Ordering::Relaxed);
        stats.load_errors = self.load_errors.load(Ordering::Relaxed);
        stats
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}
