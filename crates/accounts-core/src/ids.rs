//! Account identifiers.
//!
//! Accounts are keyed by positive integers, stored and transmitted as their
//! decimal string form. The key [`RESERVED_KEY`] shares the same keyspace and
//! holds the next-id counter; it never parses as an `AccountId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store key of the next-id counter.
pub const RESERVED_KEY: &str = "nextId";

/// An account identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(u64);

impl AccountId {
    /// Create an `AccountId` from a raw counter value.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Zero` for `0`; identifiers start at 1.
    pub fn new(value: u64) -> Result<Self, IdError> {
        if value == 0 {
            Err(IdError::Zero)
        } else {
            Ok(Self(value))
        }
    }

    /// Return the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The store key for this account.
    #[must_use]
    pub fn key(self) -> String {
        self.0.to_string()
    }
}

/// Errors when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The reserved counter key was used as an account id.
    #[error("{RESERVED_KEY} is reserved")]
    Reserved,

    /// The identifier is not a decimal integer.
    #[error("invalid account id: {0}")]
    Invalid(String),

    /// Identifier zero is never allocated.
    #[error("account id must be positive")]
    Zero,
}

impl FromStr for AccountId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == RESERVED_KEY {
            return Err(IdError::Reserved);
        }
        // u64::from_str tolerates a leading '+', which would alias keys.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::Invalid(s.to_string()));
        }
        let value: u64 = s.parse().map_err(|_| IdError::Invalid(s.to_string()))?;
        // "007" and "7" must not name different records.
        if value.to_string() != s {
            return Err(IdError::Invalid(s.to_string()));
        }
        Self::new(value)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0.to_string()
    }
}
