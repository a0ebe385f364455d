//! Cache Store Module
//!
//! Thread-safe wrapper that serializes every operation on one LRU cache.

use parking_lot::Mutex;

use crate::cache::{ByteView, CacheStats, LruCache};

// == Cache Store ==
/// Mutex-guarded LRU cache of [`ByteView`]s owned by a group.
///
/// Each operation takes the lock once and releases it before returning.
/// Eviction callbacks run while the lock is held, so they must not call
/// back into the same store.
#[derive(Debug)]
pub struct CacheStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    lru: LruCache<ByteView>,
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store bounded to `max_bytes` (0 = unbounded).
    pub fn new(max_bytes: usize) -> Self {
        Self::from_lru(LruCache::new(max_bytes))
    }

    /// Creates an empty store whose evicted entries are handed to `on_evicted`.
    pub fn with_eviction_listener<F>(max_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(String, ByteView) + Send + 'static,
    {
        Self::from_lru(LruCache::with_eviction_callback(max_bytes, on_evicted))
    }

    fn from_lru(lru: LruCache<ByteView>) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                lru,
                stats: CacheStats::new(),
            }),
        }
    }

    // == Get ==
    /// Looks up a key, recording a hit or a miss.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut inner = self.inner.lock();
        match inner.lru.get(key).cloned() {
            Some(value) => {
                inner.stats.record_hit();
                Some(value)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Add ==
    /// Stores a value, evicting least recently used entries as needed.
    pub fn add(&self, key: &str, value: ByteView) {
        self.inner.lock().lru.add(key, value);
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().lru.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.inner.lock().lru.used_bytes()
    }

    // == Stats ==
    /// Returns the store's hit, miss, eviction, and occupancy figures.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.evictions = inner.lru.evictions();
        stats.total_entries = inner.lru.len();
        stats.used_bytes = inner.lru.used_bytes();
        stats.max_bytes = inner.lru.max_bytes();
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.stats().max_bytes, 100);
    }

    #[test]
    fn test_store_add_and_get() {
        let store = CacheStore::new(0);

        store.add("key1", ByteView::from("value1"));

        assert_eq!(store.get("key1"), Some(ByteView::from("value1")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn test_store_records_hits_and_misses() {
        let store = CacheStore::new(0);
        store.add("key1", ByteView::from("v"));

        assert!(store.get("key1").is_some());
        assert!(store.get("key1").is_some());
        assert!(store.get("missing").is_none());

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_eviction_listener() {
        let (tx, rx) = mpsc::channel();
        let store = CacheStore::with_eviction_listener(4, move |key, value| {
            let _ = tx.send((key, value));
        });

        store.add("a", ByteView::from("1"));
        store.add("b", ByteView::from("2"));
        store.add("c", ByteView::from("3"));

        assert_eq!(rx.try_recv().unwrap(), ("a".to_string(), ByteView::from("1")));
        assert!(rx.try_recv().is_err());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_returned_copy_is_isolated() {
        let store = CacheStore::new(0);
        store.add("key", ByteView::from("abc"));

        let mut bytes = store.get("key").unwrap().bytes();
        bytes[0] = b'X';

        assert_eq!(store.get("key").unwrap().text(), "abc");
    }

    #[test]
    fn test_store_concurrent_access_keeps_budget() {
        let store = CacheStore::new(256);

        thread::scope(|s| {
            for t in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for i in 0..200 {
                        let key = format!("t{t}-k{i}");
                        store.add(&key, ByteView::from(format!("value-{i}")));
                        store.get(&key);
                        store.get("t0-k0");
                    }
                });
            }
        });

        let stats = store.stats();
        assert!(stats.used_bytes <= 256);
        assert_eq!(stats.hits + stats.misses, 8 * 200 * 2);
        assert!(stats.evictions > 0);
    }
}
