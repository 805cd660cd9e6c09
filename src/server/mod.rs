//! Server application core modules.
//!
//! This module contains the backend of the larder application: HTTP routing and handlers,
//! authentication, database repositories and the services implementing recipes, meal
//! planning, shopping list generation and freezer inventory.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
