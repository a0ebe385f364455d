//! Cache Module
//!
//! Provides the byte-bounded LRU cache, its immutable value type, and the
//! thread-safe store a group owns.

mod byteview;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use byteview::ByteView;
pub use entry::CacheEntry;
pub use lru::{EvictionCallback, LruCache, Value};
pub use stats::CacheStats;
pub use store::CacheStore;
