//! Tests for the service layer.
//!
//! Services run against an in-memory SQLite database created with only the tables each test
//! needs.

mod auth;
mod planning;
mod recipe;
mod settings;
mod shopping;
