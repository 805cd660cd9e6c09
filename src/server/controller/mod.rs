//! HTTP controller endpoints for the larder web API.
//!
//! Axum handlers validate request shapes, resolve the logged-in user from the cookie session
//! and delegate to services. Each handler carries its utoipa path for the OpenAPI document.

pub mod auth;
pub mod freezer;
pub mod planning;
pub mod recipe;
pub mod settings;
pub mod shopping;
pub mod util;
