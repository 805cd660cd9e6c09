use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{DeviceNameRequiredDto, ErrorDto};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("A device name is required to log in from a new device")]
    DeviceNameRequired,
    #[error("No session token present")]
    NotAuthenticated,
    #[error("Session token not found in database")]
    SessionNotFound,
    #[error("Session {0} has expired")]
    SessionExpired(i32),
    #[error("All password fields are required")]
    MissingPasswordFields,
    #[error("Password confirmation does not match")]
    PasswordMismatch,
    #[error("New password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Current password is incorrect")]
    WrongPassword,
    #[error("Device {0} not found")]
    DeviceNotFound(i32),
}

impl AuthError {
    fn unauthorized() -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Not authenticated".to_string(),
            }),
        )
            .into_response()
    }

    fn bad_request(message: String) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorDto { error: message })).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotAuthenticated | Self::SessionNotFound | Self::SessionExpired(_) => {
                Self::unauthorized()
            }
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::DeviceNameRequired => (
                StatusCode::BAD_REQUEST,
                Json(DeviceNameRequiredDto {
                    error: self.to_string(),
                    needs_device_name: true,
                }),
            )
                .into_response(),
            Self::DeviceNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::MissingCredentials
            | Self::MissingPasswordFields
            | Self::PasswordMismatch
            | Self::PasswordTooShort(_)
            | Self::WrongPassword => Self::bad_request(self.to_string()),
        }
    }
}
