//! Mini Groupcache - demo driver
//!
//! Registers one cache group backed by a slow in-memory "database" and looks
//! up every key given on the command line twice, so the second round is
//! served from the cache.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_groupcache::{registry, Config};

/// Simulated latency of the backing store.
const SLOW_DB_DELAY: Duration = Duration::from_millis(50);

fn slow_db() -> HashMap<&'static str, &'static str> {
    HashMap::from([("Tom", "630"), ("Jack", "589"), ("Sam", "567")])
}

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_groupcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: group={}, cache_bytes={}",
        config.group_name, config.cache_bytes
    );

    let db = slow_db();
    registry::new_group(&config.group_name, config.cache_bytes, move |key: &str| {
        info!("[SlowDB] search key {}", key);
        thread::sleep(SLOW_DB_DELAY);
        db.get(key)
            .map(|v| v.as_bytes().to_vec())
            .with_context(|| format!("{key} not exist"))
    });

    let group = registry::get_group(&config.group_name)
        .with_context(|| format!("group {} was not registered", config.group_name))?;

    let mut keys: Vec<String> = std::env::args().skip(1).collect();
    if keys.is_empty() {
        keys = vec!["Tom".into(), "Jack".into(), "Sam".into(), "Kate".into()];
    }

    for round in 1..=2 {
        for key in &keys {
            match group.get(key) {
                Ok(value) => info!(round, key = %key, value = %value, "Lookup succeeded"),
                Err(err) => warn!(round, key = %key, error = %err, "Lookup failed"),
            }
        }
    }

    let stats = group.stats();
    info!("Hit rate: {:.2}", stats.hit_rate());
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
