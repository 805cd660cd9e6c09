//! Request and response bodies of the JSON API.

pub mod api;
pub mod auth;
pub mod freezer;
pub mod planning;
pub mod recipe;
pub mod settings;
pub mod shopping;
pub mod unit;
