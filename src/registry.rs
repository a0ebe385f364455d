//! Group Registry Module
//!
//! Maps group names to shared group instances.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::group::{Group, Loader};

// == Group Registry ==
/// Name to group mapping guarded by its own lock.
///
/// The registry lock is independent of every group's cache lock; it is only
/// held while a group is looked up or registered, never during `Group::get`.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Creates a group and registers it under `name`.
    ///
    /// A group previously registered under the same name is replaced; callers
    /// still holding it keep a working, now unregistered, group.
    pub fn new_group(
        &self,
        name: &str,
        cache_bytes: usize,
        loader: impl Loader + 'static,
    ) -> Arc<Group> {
        let group = Arc::new(Group::new(name, cache_bytes, loader));
        let previous = self
            .groups
            .write()
            .insert(name.to_string(), Arc::clone(&group));

        if previous.is_some() {
            warn!(group = name, "Replaced existing cache group");
        } else {
            info!(group = name, cache_bytes, "Registered cache group");
        }
        group
    }

    // == Get Or Create ==
    /// Returns the group registered under `name`, creating it if absent.
    ///
    /// `loader` is dropped unused when the group already exists.
    pub fn get_or_create(
        &self,
        name: &str,
        cache_bytes: usize,
        loader: impl Loader + 'static,
    ) -> Arc<Group> {
        let mut groups = self.groups.write();
        if let Some(existing) = groups.get(name) {
            return Arc::clone(existing);
        }

        let group = Arc::new(Group::new(name, cache_bytes, loader));
        groups.insert(name.to_string(), Arc::clone(&group));
        info!(group = name, cache_bytes, "Registered cache group");
        group
    }

    // == Get Group ==
    /// Looks up a group by name.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }

    /// Returns the registered group names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }
}

// == Process-wide Registry ==
static GLOBAL: Lazy<GroupRegistry> = Lazy::new(GroupRegistry::new);

/// Returns the process-wide registry.
///
/// Starts empty and is never reset. Prefer passing a [`GroupRegistry`]
/// explicitly; this instance is meant for the top-level composition root.
pub fn global() -> &'static GroupRegistry {
    &GLOBAL
}

/// Registers a group in the process-wide registry.
pub fn new_group(name: &str, cache_bytes: usize, loader: impl Loader + 'static) -> Arc<Group> {
    global().new_group(name, cache_bytes, loader)
}

/// Looks up a group in the process-wide registry.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    global().get_group(name)
}
