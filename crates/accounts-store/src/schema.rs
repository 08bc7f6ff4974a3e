//! Database schema definitions and column families.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Every key of the store: account hashes and the `nextId` counter.
    /// Values are CBOR-encoded `StoredValue`s.
    pub const RECORDS: &str = "records";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::RECORDS]
}
