//! Application state.

use std::sync::Arc;

use accounts_store::{AllocatorError, IdAllocator, MemoryStore, Store, StoreError};

use crate::config::{ServiceConfig, StoreBackend};

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The store could not be opened or did not answer.
    #[error("store unavailable: {0}")]
    Store(#[from] StoreError),

    /// The id counter could not be initialized.
    #[error("id allocator: {0}")]
    Allocator(#[from] AllocatorError),

    /// The configured backend was not compiled in.
    #[error("store backend {0} is not available in this build")]
    BackendDisabled(StoreBackend),
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Allocator for new account ids.
    pub ids: IdAllocator,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create the application state, failing fast if the store is unusable.
    ///
    /// Pings the store and seeds the `nextId` counter if it is absent.
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Result<Self, StartupError> {
        store.ping()?;

        let ids = IdAllocator::new(Arc::clone(&store));
        let next_id = ids.initialize()?;
        tracing::info!(next_id = %next_id, "Id allocator ready");

        Ok(Self { store, ids, config })
    }
}

/// Open the backend selected by `config.store_backend`.
pub fn open_store(config: &ServiceConfig) -> Result<Arc<dyn Store>, StartupError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store - data will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        StoreBackend::RocksDb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            Ok(Arc::new(accounts_store::RocksStore::open(&config.data_dir)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StoreBackend::RocksDb => Err(StartupError::BackendDisabled(StoreBackend::RocksDb)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounts_core::{Fields, RESERVED_KEY};
    use accounts_store::Result as StoreResult;

    /// A store whose backend is down.
    struct DownStore;

    impl Store for DownStore {
        fn ping(&self) -> StoreResult<()> {
            Err(StoreError::Database("connection refused".into()))
        }
        fn get_hash(&self, _: &str) -> StoreResult<Option<Fields>> {
            unreachable!()
        }
        fn set_hash(&self, _: &str, _: &Fields) -> StoreResult<()> {
            unreachable!()
        }
        fn set_hash_if_absent(&self, _: &str, _: &Fields) -> StoreResult<bool> {
            unreachable!()
        }
        fn set_hash_if_present(&self, _: &str, _: &Fields) -> StoreResult<bool> {
            unreachable!()
        }
        fn get_counter(&self, _: &str) -> StoreResult<Option<u64>> {
            unreachable!()
        }
        fn init_counter(&self, _: &str, _: u64) -> StoreResult<bool> {
            unreachable!()
        }
        fn fetch_increment(&self, _: &str) -> StoreResult<u64> {
            unreachable!()
        }
        fn delete(&self, _: &str) -> StoreResult<bool> {
            unreachable!()
        }
        fn exists(&self, _: &str) -> StoreResult<bool> {
            unreachable!()
        }
        fn keys(&self) -> StoreResult<Vec<String>> {
            unreachable!()
        }
    }

    #[test]
    fn new_seeds_counter() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), ServiceConfig::default()).unwrap();
        assert_eq!(store.get_counter(RESERVED_KEY).unwrap(), Some(1));
        assert_eq!(state.ids.peek_next_id().unwrap().get(), 1);
    }

    #[test]
    fn unreachable_store_fails_startup() {
        let result = AppState::new(Arc::new(DownStore), ServiceConfig::default());
        assert!(matches!(result, Err(StartupError::Store(_))));
    }

    #[test]
    fn memory_backend_opens() {
        let config = ServiceConfig {
            store_backend: StoreBackend::Memory,
            ..ServiceConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[cfg(feature = "rocksdb-backend")]
    #[test]
    fn rocksdb_backend_opens_in_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ServiceConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..ServiceConfig::default()
        };
        let store = open_store(&config).unwrap();
        let state = AppState::new(store, config).unwrap();
        assert_eq!(state.ids.allocate_id().unwrap().get(), 1);
    }
}
