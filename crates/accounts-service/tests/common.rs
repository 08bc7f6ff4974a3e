//! Common test utilities for accounts integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use accounts_core::{Fields, RESERVED_KEY};
use accounts_service::{create_router, AppState, ServiceConfig, StoreBackend};
use accounts_store::{MemoryStore, Result as StoreResult, Store, StoreError};

fn test_config() -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        store_backend: StoreBackend::Memory,
        ..ServiceConfig::default()
    }
}

fn test_server(store: Arc<dyn Store>) -> TestServer {
    let state = AppState::new(store, test_config()).expect("Failed to build app state");
    let router: Router = create_router(state);
    TestServer::new(router).expect("Failed to create test server")
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for direct inspection.
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Create a new test harness with an empty store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a test harness over an existing store.
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let server = test_server(store.clone());
        Self { server, store }
    }

    /// POST an account and return the created record, asserting 201.
    pub async fn create_account(&self, body: Value) -> Value {
        let response = self.server.post("/accounts").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// The id the next create will receive.
    pub fn next_id(&self) -> String {
        self.store
            .get_counter(RESERVED_KEY)
            .expect("store read failed")
            .expect("counter not initialized")
            .to_string()
    }

    /// Number of accounts returned by an unfiltered list.
    pub async fn account_count(&self) -> usize {
        let response = self.server.get("/accounts").await;
        response.assert_status_ok();
        response.json::<Vec<Value>>().len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Store outages
// ============================================================================

/// A memory store that fails every operation once taken down.
#[derive(Default)]
pub struct OutageStore {
    inner: MemoryStore,
    down: AtomicBool,
}

impl OutageStore {
    /// Make every later operation fail.
    pub fn take_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(StoreError::Database("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl Store for OutageStore {
    fn ping(&self) -> StoreResult<()> {
        self.check()?;
        self.inner.ping()
    }

    fn get_hash(&self, key: &str) -> StoreResult<Option<Fields>> {
        self.check()?;
        self.inner.get_hash(key)
    }

    fn set_hash(&self, key: &str, fields: &Fields) -> StoreResult<()> {
        self.check()?;
        self.inner.set_hash(key, fields)
    }

    fn set_hash_if_absent(&self, key: &str, fields: &Fields) -> StoreResult<bool> {
        self.check()?;
        self.inner.set_hash_if_absent(key, fields)
    }

    fn set_hash_if_present(&self, key: &str, fields: &Fields) -> StoreResult<bool> {
        self.check()?;
        self.inner.set_hash_if_present(key, fields)
    }

    fn get_counter(&self, key: &str) -> StoreResult<Option<u64>> {
        self.check()?;
        self.inner.get_counter(key)
    }

    fn init_counter(&self, key: &str, value: u64) -> StoreResult<bool> {
        self.check()?;
        self.inner.init_counter(key, value)
    }

    fn fetch_increment(&self, key: &str) -> StoreResult<u64> {
        self.check()?;
        self.inner.fetch_increment(key)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        self.check()?;
        self.inner.delete(key)
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        self.check()?;
        self.inner.exists(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        self.check()?;
        self.inner.keys()
    }
}

/// Test harness whose store can be taken down after startup.
pub struct OutageHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server.
    pub store: Arc<OutageStore>,
}

impl OutageHarness {
    /// Start a server over a healthy store.
    pub fn new() -> Self {
        let store = Arc::new(OutageStore::default());
        let server = test_server(store.clone());
        Self { server, store }
    }
}
