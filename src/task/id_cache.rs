//! Shared handle-to-id resolution cache

use std::collections::HashMap;
use std::sync::RwLock;

/// Run-lifetime map from an opaque profile handle to a numeric user id
///
/// Populated by secondary lookups and consulted by the comment extractor.
/// Writes are first-write-wins per handle; two lookups racing on the same
/// handle both resolve to the same id, so the race is harmless. The cache
/// is injected wherever it is needed, bounded by the size of one run.
#[derive(Debug, Default)]
pub struct UserIdCache {
    entries: RwLock<HashMap<String, u64>>,
}

impl UserIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the resolved id for a handle
    pub fn get(&self, handle: &str) -> Option<u64> {
        self.entries.read().unwrap().get(handle).copied()
    }

    /// Records a resolved id, keeping any value already present
    pub fn insert(&self, handle: &str, user_id: u64) {
        self.entries
            .write()
            .unwrap()
            .entry(handle.to_string())
            .or_insert(user_id);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
