//! LRU Cache Module
//!
//! Byte-bounded least recently used cache backed by an entry arena.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::entry::CacheEntry;

// == Value ==
/// A value that can report how many bytes it charges against the budget.
pub trait Value {
    fn size(&self) -> usize;
}

impl Value for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

/// Callback invoked with each entry removed by [`LruCache::remove_oldest`].
pub type EvictionCallback<V> = Box<dyn FnMut(String, V) + Send>;

// == LRU Cache ==
/// A byte-bounded key/value cache with least recently used eviction.
///
/// Entries live in a vector of slots linked into a doubly linked recency list
/// by index, with freed slots recycled through a free list:
/// - `head` = Most recently used
/// - `tail` = Least recently used
///
/// Every entry charges `key.len() + value.size()` bytes. With a nonzero
/// `max_bytes`, [`LruCache::add`] evicts from the tail until usage fits again.
/// A `max_bytes` of zero disables eviction.
pub struct LruCache<V> {
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Bytes charged by the entries currently stored
    used_bytes: usize,
    /// Entry arena
    slots: Vec<Option<CacheEntry<V>>>,
    /// Vacant slot indices
    free: Vec<usize>,
    /// Key to slot index
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    /// Number of entries removed through `remove_oldest`
    evictions: u64,
    on_evicted: Option<EvictionCallback<V>>,
}

impl<V: Value> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_bytes` bytes (0 = unbounded).
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            evictions: 0,
            on_evicted: None,
        }
    }

    /// Creates an empty cache that hands every evicted entry to `on_evicted`.
    ///
    /// The callback runs synchronously inside whichever call caused the eviction.
    pub fn with_eviction_callback<F>(max_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        let mut cache = Self::new(max_bytes);
        cache.on_evicted = Some(Box::new(on_evicted));
        cache
    }

    // == Get ==
    /// Looks up a key and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        self.node(idx).map(|entry| &entry.value)
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts until the budget holds.
    ///
    /// Replacing an existing key adjusts usage by the size difference and
    /// promotes the key to most recently used. An entry larger than the whole
    /// budget ends up evicting everything, itself included.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            self.move_to_front(idx);
            let new_size = value.size();
            let old_size = match self.node_mut(idx) {
                Some(entry) => std::mem::replace(&mut entry.value, value).size(),
                None => 0,
            };
            self.used_bytes = self.used_bytes - old_size + new_size;
        } else {
            let size = key.len() + value.size();
            let idx = self.alloc(CacheEntry::new(key.clone(), value));
            self.index.insert(key, idx);
            self.push_front(idx);
            self.used_bytes += size;
        }

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    // == Remove Oldest ==
    /// Removes the least recently used entry, notifying the eviction callback.
    ///
    /// Returns false if the cache was empty.
    pub fn remove_oldest(&mut self) -> bool {
        let Some(idx) = self.tail else {
            return false;
        };
        self.unlink(idx);
        let Some(entry) = self.slots.get_mut(idx).and_then(Option::take) else {
            return false;
        };
        self.free.push(idx);
        self.index.remove(&entry.key);
        self.used_bytes -= entry.key.len() + entry.value.size();
        self.evictions += 1;

        debug!(
            key = %entry.key,
            used_bytes = self.used_bytes,
            "Evicted least recently used entry"
        );

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            let (key, value) = entry.into_parts();
            on_evicted(key, value);
        }
        true
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without promoting it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.tail
            .and_then(|idx| self.node(idx))
            .map(|entry| entry.key.as_str())
    }

    /// Checks for a key without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the keys ordered from most to least recently used.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(entry) = cursor.and_then(|idx| self.node(idx)) {
            keys.push(entry.key.as_str());
            cursor = entry.next;
        }
        keys
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Total number of entries removed as least recently used.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    // == Arena Helpers ==
    fn node(&self, idx: usize) -> Option<&CacheEntry<V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut CacheEntry<V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn alloc(&mut self, entry: CacheEntry<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.node_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(entry) = self.node_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(entry) = self.node_mut(idx) {
            entry.prev = None;
            entry.next = None;
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(entry) = self.node_mut(idx) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(h) => {
                if let Some(entry) = self.node_mut(h) {
                    entry.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.index.len())
            .field("evictions", &self.evictions)
            .finish()
    }
}
