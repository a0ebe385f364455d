//! Mini Groupcache - An in-process, byte-bounded key/value cache
//!
//! Named groups serve lookups from an LRU cache and fill it from a
//! caller-supplied loader on a miss.

pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod registry;

pub use cache::{ByteView, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{Group, Loader};
pub use registry::GroupRegistry;
