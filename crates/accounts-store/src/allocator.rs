//! Account id allocation.
//!
//! The next id lives in the store as the counter [`RESERVED_KEY`]. Allocation
//! is a single `fetch_increment`, so concurrent callers never receive the
//! same id.

use std::sync::Arc;

use accounts_core::{AccountId, IdError, RESERVED_KEY};

use crate::accounts::AccountStore;
use crate::error::StoreError;
use crate::Store;

/// Errors from the id allocator.
#[derive(Debug, thiserror::Error)]
pub enum AllocatorError {
    /// The counter record is missing.
    #[error("id counter {RESERVED_KEY} is not initialized")]
    NotInitialized,

    /// The counter holds a value that is not a valid id.
    #[error("id counter holds an invalid value: {0}")]
    InvalidCounter(#[from] IdError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Hands out strictly increasing account ids.
#[derive(Clone)]
pub struct IdAllocator {
    store: Arc<dyn Store>,
}

impl IdAllocator {
    /// Create an allocator over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Seed the counter if it is absent.
    ///
    /// The seed is one past the number of accounts already stored. An
    /// existing counter is left untouched. Returns the next id to allocate.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn initialize(&self) -> Result<AccountId, AllocatorError> {
        if self.store.get_counter(RESERVED_KEY)?.is_none() {
            let existing = self.store.account_ids()?.len() as u64;
            if self.store.init_counter(RESERVED_KEY, existing + 1)? {
                tracing::info!(next_id = existing + 1, "Initialized id counter");
            }
        }
        self.peek_next_id()
    }

    /// Read the next id without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `AllocatorError::NotInitialized` if the counter is missing.
    pub fn peek_next_id(&self) -> Result<AccountId, AllocatorError> {
        let value = self
            .store
            .get_counter(RESERVED_KEY)?
            .ok_or(AllocatorError::NotInitialized)?;
        Ok(AccountId::new(value)?)
    }

    /// Consume and return the next id.
    ///
    /// # Errors
    ///
    /// Returns `AllocatorError::NotInitialized` if the counter is missing.
    pub fn allocate_id(&self) -> Result<AccountId, AllocatorError> {
        let value = self
            .store
            .fetch_increment(RESERVED_KEY)
            .map_err(|e| match e {
                StoreError::NotFound { .. } => AllocatorError::NotInitialized,
                other => AllocatorError::Store(other),
            })?;
        Ok(AccountId::new(value)?)
    }
}
