//! Error types for account storage.

use accounts_core::RecordError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Key not found.
    #[error("key not found: {key}")]
    NotFound {
        /// The missing key.
        key: String,
    },

    /// The key holds a value of the other kind.
    #[error("key {key} holds a {found}")]
    WrongType {
        /// The key that was accessed.
        key: String,
        /// Kind of value actually stored.
        found: &'static str,
    },

    /// A stored record is not a valid account.
    #[error(transparent)]
    Record(#[from] RecordError),
}
