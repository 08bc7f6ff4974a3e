//! API handlers.

pub mod accounts;
pub mod index;
