//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};

use accounts_core::Fields;

use crate::error::{Result, StoreError};
use crate::schema::{all_column_families, cf};
use crate::{Store, StoredValue};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes read-modify-write sequences; plain reads and writes skip it.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db.cf_handle(cf::RECORDS).ok_or_else(|| {
            StoreError::Database(format!("column family not found: {}", cf::RECORDS))
        })
    }

    /// Serialize a value using CBOR.
    fn serialize(value: &StoredValue) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize(data: &[u8]) -> Result<StoredValue> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn load(&self, key: &str) -> Result<Option<StoredValue>> {
        let cf = self.cf()?;
        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn save(&self, key: &str, value: &StoredValue) -> Result<()> {
        let cf = self.cf()?;
        let data = Self::serialize(value)?;
        self.db
            .put_cf(&cf, key.as_bytes(), data)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    fn ping(&self) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .get_cf(&cf, b"")
            .map(|_| ())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_hash(&self, key: &str) -> Result<Option<Fields>> {
        self.load(key)?.map(|value| value.into_hash(key)).transpose()
    }

    fn set_hash(&self, key: &str, fields: &Fields) -> Result<()> {
        let _guard = self.write_lock.lock();
        if let Some(existing @ StoredValue::Counter(_)) = self.load(key)? {
            return Err(StoreError::WrongType {
                key: key.to_string(),
                found: existing.kind(),
            });
        }
        self.save(key, &StoredValue::Hash(fields.clone()))
    }

    fn set_hash_if_absent(&self, key: &str, fields: &Fields) -> Result<bool> {
        let _guard = self.write_lock.lock();
        if self.load(key)?.is_some() {
            return Ok(false);
        }
        self.save(key, &StoredValue::Hash(fields.clone()))?;
        Ok(true)
    }

    fn set_hash_if_present(&self, key: &str, fields: &Fields) -> Result<bool> {
        let _guard = self.write_lock.lock();
        match self.load(key)? {
            Some(StoredValue::Hash(_)) => {
                self.save(key, &StoredValue::Hash(fields.clone()))?;
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
        self.load(key)?
            .map(|value| value.as_counter(key))
            .transpose()
    }

    fn init_counter(&self, key: &str, value: u64) -> Result<bool> {
        let _guard = self.write_lock.lock();
        if self.load(key)?.is_some() {
            return Ok(false);
        }
        self.save(key, &StoredValue::Counter(value))?;
        Ok(true)
    }

    fn fetch_increment(&self, key: &str) -> Result<u64> {
        let _guard = self.write_lock.lock();
        let current = self
            .load(key)?
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })?
            .as_counter(key)?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::Database(format!("counter {key} overflowed")))?;
        self.save(key, &StoredValue::Counter(next))?;
        Ok(current)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let existed = self.load(key)?.is_some();
        if existed {
            let cf = self.cf()?;
            self.db
                .delete_cf(&cf, key.as_bytes())
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }
        Ok(existed)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let cf = self.cf()?;
        self.db
            .get_pinned_cf(&cf, key.as_bytes())
            .map(|value| value.is_some())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>> {
        let cf = self.cf()?;
        let mut keys = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            keys.push(key);
        }
        Ok(keys)
    }
}
