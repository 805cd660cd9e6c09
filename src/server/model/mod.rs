//! Server-side state and session types.

pub mod app;
pub mod session;
