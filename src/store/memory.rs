// In-memory key-value store.
// Backs tests and short-lived processes; an optional byte capacity lets
// quota overflow behavior be exercised deterministically.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StoreError};

/// HashMap-backed store with an optional capacity limit.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    capacity_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded in-memory store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity_bytes: None,
        }
    }

    /// Create a store that rejects writes once the summed size of keys
    /// and values would exceed `capacity` bytes.
    pub fn with_capacity_bytes(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity_bytes: Some(capacity),
        }
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();

        if let Some(capacity) = self.capacity_bytes {
            // Overwrites reclaim the space of the value they replace.
            let current = Self::used_bytes(&entries);
            let replaced = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let after = current - replaced + key.len() + value.len();
            if after > capacity {
                return Err(StoreError::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.keys().cloned().collect())
    }
}
