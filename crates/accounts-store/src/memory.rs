//! In-memory storage implementation.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use accounts_core::Fields;

use crate::error::{Result, StoreError};
use crate::{Store, StoredValue};

/// A process-local store.
///
/// All operations take a single lock, so compound operations are atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Store for MemoryStore {
    fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn get_hash(&self, key: &str) -> Result<Option<Fields>> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .map(|value| value.into_hash(key))
            .transpose()
    }

    fn set_hash(&self, key: &str, fields: &Fields) -> Result<()> {
        let mut entries = self.entries.write();
        if let Some(existing @ StoredValue::Counter(_)) = entries.get(key) {
            return Err(StoreError::WrongType {
                key: key.to_string(),
                found: existing.kind(),
            });
        }
        entries.insert(key.to_string(), StoredValue::Hash(fields.clone()));
        Ok(())
    }

    fn set_hash_if_absent(&self, key: &str, fields: &Fields) -> Result<bool> {
        let mut entries = self.entries.write();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), StoredValue::Hash(fields.clone()));
        Ok(true)
    }

    fn set_hash_if_present(&self, key: &str, fields: &Fields) -> Result<bool> {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(StoredValue::Hash(existing)) => {
                existing.clone_from(fields);
                Ok(true)
            }
            Some(other) => Err(StoreError::WrongType {
                key: key.to_string(),
                found: other.kind(),
            }),
            None => Ok(false),
        }
    }

    fn get_counter(&self, key: &str) -> Result<Option<u64>> {
        self.entries
            .read()
            .get(key)
            .map(|value| value.as_counter(key))
            .transpose()
    }

    fn init_counter(&self, key: &str, value: u64) -> Result<bool> {
        let mut entries = self.entries.write();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), StoredValue::Counter(value));
        Ok(true)
    }

    fn fetch_increment(&self, key: &str) -> Result<u64> {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(StoredValue::Counter(value)) => {
                let current = *value;
                *value = current
                    .checked_add(1)
                    .ok_or_else(|| StoreError::Database(format!("counter {key} overflowed")))?;
                Ok(current)
            }
            Some(other) => Err(StoreError::WrongType {
                key: key.to_string(),
                found: other.kind(),
            }),
            None => Err(StoreError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}
