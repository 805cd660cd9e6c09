//! Error types for the larder server.
//!
//! Domain errors with their own HTTP mapping live in submodules; everything else falls
//! through to [`InternalServerError`], which logs the cause and answers with a generic 500.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError},
};

/// Main error type for the larder server.
///
/// Aggregates domain errors and library errors so handlers and services can use `?`
/// throughout. The `IntoResponse` implementation picks the status code.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (credentials, devices, sessions).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request rejected before any mutation; the message is shown to the client.
    #[error("{0}")]
    ValidationError(String),
    /// Requested resource does not exist; the message is shown to the client.
    #[error("{0}")]
    NotFound(String),
    /// Failed to parse a value read back from storage or the session.
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal invariant violated.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Valkey/Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Socket error while binding or serving.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(message) => {
                tracing::debug!("Rejected request: {}", message);

                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: message })).into_response()
            }
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                (StatusCode::NOT_FOUND, Json(ErrorDto { error: message })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message so implementation details are not
/// leaked to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
