use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{DeviceNameRequiredDto, ErrorDto},
        auth::{ChangePasswordDto, LoginDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::{app::AppState, session::SessionToken},
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Log in with username and password
///
/// The device is recognized from its user agent; logging in from a new device requires a
/// `device_name`.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Missing credentials or device name required", body = DeviceNameRequiredDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(credentials): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok());

    let outcome = AuthService::new(&state.db)
        .login(credentials, user_agent)
        .await?;

    session.cycle_id().await?;
    SessionToken::insert(&session, &outcome.token).await?;

    Ok((StatusCode::OK, Json(outcome.user)))
}

/// Log out, ending the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    if let Some(token) = SessionToken::get(&session).await? {
        AuthService::new(&state.db).logout(&token).await?;
        session.flush().await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged in user and the device of the current session
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(user.to_dto())))
}

/// Change the password of the logged in user
#[utoipa::path(
    post,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Missing fields, mismatch, too short or wrong current password", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(change): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    AuthService::new(&state.db)
        .change_password(user.user.id, change)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
