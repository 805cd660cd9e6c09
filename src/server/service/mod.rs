//! Service layer for business logic.
//!
//! Services combine repositories into the operations exposed by the HTTP API. Operations
//! that touch several rows open a transaction and hand it to the repositories.

pub mod auth;
pub mod conversion;
pub mod freezer;
pub mod planning;
pub mod recipe;
pub mod settings;
pub mod shopping;
