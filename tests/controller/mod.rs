//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extractors built by hand, then converted into a
//! response to check the status code and, where it matters, the JSON body.

mod auth;
mod freezer;
mod planning;
mod recipe;
mod shopping;

use axum::{body::to_bytes, response::Response};
use serde_json::Value;

/// Reads a response body as JSON
async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
