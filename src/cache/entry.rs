//! Cache Entry Module
//!
//! Defines the arena node that links cached entries in recency order.

// == Cache Entry ==
/// A single cached key/value pair plus its neighbours in recency order.
///
/// `prev` points towards the most recently used end, `next` towards the
/// least recently used end. Both are slot indices into the owning arena.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached key
    pub key: String,
    /// The cached value
    pub value: V,
    /// Slot of the more recently used neighbour
    pub prev: Option<usize>,
    /// Slot of the less recently used neighbour
    pub next: Option<usize>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Unwraps the entry into its key and value.
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}
