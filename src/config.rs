//! Configuration Module
//!
//! Handles loading the demo's cache configuration from environment variables.

use std::env;

/// Default byte budget for the demo group (2 KiB).
pub const DEFAULT_CACHE_BYTES: usize = 2 << 10;

/// Default name of the demo group.
pub const DEFAULT_GROUP_NAME: &str = "scores";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Byte budget of the group's cache, 0 = unbounded
    pub cache_bytes: usize,
    /// Name the group is registered under
    pub group_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BYTES` - Byte budget of the cache (default: 2048)
    /// - `GROUP_NAME` - Name of the cache group (default: "scores")
    pub fn from_env() -> Self {
        Self {
            cache_bytes: env::var("CACHE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_BYTES),
            group_name: env::var("GROUP_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_GROUP_NAME.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_bytes: DEFAULT_CACHE_BYTES,
            group_name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}
