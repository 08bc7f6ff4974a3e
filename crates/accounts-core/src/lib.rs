//! Core types and validation for the accounts service.
//!
//! This crate provides the domain types shared by the store and the HTTP service:
//!
//! - **Identifiers**: `AccountId` and the reserved counter key
//! - **Balances**: `Balance`, a non-negative decimal amount with a canonical
//!   two-decimal text form
//! - **Accounts**: `Account`, `AccountType`, and the flat `Fields` record layout
//! - **Payloads**: `AccountPayload`, the validated create/update request body
//!
//! # Canonical representation
//!
//! On the wire and in the store every field is a string: ids are decimal
//! integers, balances always carry exactly two fraction digits, and the
//! active flag is `"0"` or `"1"`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod balance;
pub mod error;
pub mod ids;
pub mod payload;

pub use account::{Account, AccountType, Fields, RecordError, CREATED_TIME_FORMAT};
pub use balance::{validate_balance, Balance};
pub use error::{BalanceError, Field, ValidationError};
pub use ids::{AccountId, IdError, RESERVED_KEY};
pub use payload::{find_missing_fields, validate_name, AccountPayload};
