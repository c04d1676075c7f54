//! Durable key-value storage.
//!
//! Modeled on browser `localStorage`: string keys, string values, writes can
//! fail (quota, private mode), reads never do.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// A write that could not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to persist '{key}': {reason}")]
pub struct StoreError {
    pub key: String,
    pub reason: String,
}

/// String key-value persistence.
pub trait KeyValueStore {
    /// Read a value. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Lives as long as the value does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like storage with no quota left.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            values: FxHashMap::default(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing the read-only flag.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k"), Some("v2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut store = MemoryStore::read_only();
        let err = store.set("k", "v").unwrap_err();

        assert_eq!(err.key, "k");
        assert!(store.is_empty());

        store.insert_raw("k", "seeded");
        assert_eq!(store.get("k"), Some("seeded".to_string()));
    }
}
