//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries per table, grouped by domain. Each borrows any
//! [`sea_orm::ConnectionTrait`] so services can run them on a connection or inside a
//! transaction.

pub mod auth;
pub mod catalog;
pub mod freezer;
pub mod planning;
pub mod recipe;
pub mod shopping;
