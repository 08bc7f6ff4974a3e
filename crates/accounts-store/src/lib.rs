//! Key-value storage layer for the accounts service.
//!
//! The store holds two kinds of values in a single string keyspace:
//!
//! - **Hash records**: flat string field maps, one per account, keyed by id
//! - **Counters**: unsigned integers with an atomic fetch-and-increment,
//!   used for the `nextId` allocator
//!
//! Two backends implement [`Store`]:
//!
//! - [`MemoryStore`]: process-local, used by tests and `STORE_BACKEND=memory`
//! - `RocksStore`: persistent, behind the `rocksdb-backend` feature
//!
//! # Example
//!
//! ```
//! use accounts_store::{IdAllocator, MemoryStore, Store};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
//! let ids = IdAllocator::new(store.clone());
//! ids.initialize().unwrap();
//!
//! let first = ids.allocate_id().unwrap();
//! assert_eq!(first.get(), 1);
//! assert_eq!(ids.peek_next_id().unwrap().get(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accounts;
pub mod allocator;
pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use accounts::AccountStore;
pub use allocator::{AllocatorError, IdAllocator};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use accounts_core::Fields;
use serde::{Deserialize, Serialize};

/// A value held under a store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoredValue {
    /// A hash record.
    Hash(Fields),
    /// An integer counter.
    Counter(u64),
}

impl StoredValue {
    /// Name of this kind of value, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Hash(_) => "hash",
            Self::Counter(_) => "counter",
        }
    }

    pub(crate) fn into_hash(self, key: &str) -> Result<Fields> {
        match self {
            Self::Hash(fields) => Ok(fields),
            other @ Self::Counter(_) => Err(StoreError::WrongType {
                key: key.to_string(),
                found: other.kind(),
            }),
        }
    }

    pub(crate) fn as_counter(&self, key: &str) -> Result<u64> {
        match self {
            Self::Counter(value) => Ok(*value),
            other @ Self::Hash(_) => Err(StoreError::WrongType {
                key: key.to_string(),
                found: other.kind(),
            }),
        }
    }
}

/// The storage trait defining the key-value operations the service needs.
///
/// Implementations must make the conditional writes (`set_hash_if_absent`,
/// `set_hash_if_present`, `init_counter`) and `fetch_increment` atomic with
/// respect to each other and to `delete`.
pub trait Store: Send + Sync {
    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot serve requests.
    fn ping(&self) -> Result<()>;

    // =========================================================================
    // Hash Records
    // =========================================================================

    /// Get the hash record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a counter.
    fn get_hash(&self, key: &str) -> Result<Option<Fields>>;

    /// Insert or replace the hash record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a counter.
    fn set_hash(&self, key: &str, fields: &Fields) -> Result<()>;

    /// Insert the hash record under `key` only if the key is unused.
    ///
    /// Returns `false` without writing if the key already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn set_hash_if_absent(&self, key: &str, fields: &Fields) -> Result<bool>;

    /// Replace the hash record under `key` only if one is already there.
    ///
    /// Returns `false` without writing if the key is unused.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a counter.
    fn set_hash_if_present(&self, key: &str, fields: &Fields) -> Result<bool>;

    // =========================================================================
    // Counters
    // =========================================================================

    /// Read the counter under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WrongType` if `key` holds a hash record.
    fn get_counter(&self, key: &str) -> Result<Option<u64>>;

    /// Create the counter under `key` with `value` if the key is unused.
    ///
    /// Returns `false` if the key already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn init_counter(&self, key: &str, value: u64) -> Result<bool>;

    /// Atomically add one to the counter under `key`, returning the value it
    /// held before.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the counter does not exist.
    /// - `StoreError::WrongType` if `key` holds a hash record.
    fn fetch_increment(&self, key: &str) -> Result<u64>;

    // =========================================================================
    // Keyspace
    // =========================================================================

    /// Remove `key`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Check whether `key` holds any value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn exists(&self, key: &str) -> Result<bool>;

    /// All keys, in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn keys(&self) -> Result<Vec<String>>;
}
