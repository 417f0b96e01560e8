//! In-memory storage backend.

use crate::error::Result;
use crate::store::{StoreBackend, StoreKey};
use std::collections::HashMap;

/// Volatile [`StoreBackend`] holding values in a map.
///
/// Used by tests and by ephemeral runs that should leave no data behind.
/// Can be primed with [`MemoryStore::insert`] to simulate pre-existing
/// state, including malformed records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<StoreKey, Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts raw bytes under `key` without going through the backend trait.
    pub fn insert(&mut self, key: StoreKey, bytes: impl Into<Vec<u8>>) {
        self.values.insert(key, bytes.into());
    }
}

impl StoreBackend for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>> {
        Ok(self.values.get(&key).cloned())
    }

    fn save(&mut self, key: StoreKey, bytes: &[u8]) -> Result<()> {
        self.values.insert(key, bytes.to_vec());
        Ok(())
    }
}
