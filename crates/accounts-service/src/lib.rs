//! Accounts HTTP API Service.
//!
//! This crate provides a small REST API over bank account records:
//!
//! - Listing with optional `name` and `type` filters
//! - Lookup, create, update, deactivate, and idempotent delete by id
//! - Index and health endpoints
//!
//! Records live in an [`accounts_store::Store`]; ids come from the store's
//! `nextId` counter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Store calls are synchronous but handlers must be async

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ServiceConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::{open_store, AppState, StartupError};
