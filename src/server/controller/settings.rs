use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        settings::{CreateStoreDto, SettingsDto, StoreDto},
        unit::{UnitDto, UpdateUnitDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{auth::AuthService, settings::SettingsService},
    },
};

pub static SETTINGS_TAG: &str = "settings";

/// Get units, stores, store sections and the devices of the logged in user
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = SETTINGS_TAG,
    responses(
        (status = 200, description = "Settings", body = SettingsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let settings = SettingsService::new(&state.db).get(user.user.id).await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// Update the display forms of a unit
#[utoipa::path(
    patch,
    path = "/api/settings/units/{code}",
    tag = SETTINGS_TAG,
    params(("code" = String, Path, description = "Unit code")),
    request_body = UpdateUnitDto,
    responses(
        (status = 200, description = "Unit updated", body = UnitDto),
        (status = 400, description = "Empty display form", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Unit not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_unit(
    State(state): State<AppState>,
    session: Session,
    Path(code): Path<String>,
    Json(forms): Json<UpdateUnitDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let unit = SettingsService::new(&state.db)
        .update_unit(&code, &forms.singular_form, &forms.plural_form)
        .await?;

    Ok((StatusCode::OK, Json(unit)))
}

/// Add a store at the end of the store list
#[utoipa::path(
    post,
    path = "/api/settings/stores",
    tag = SETTINGS_TAG,
    request_body = CreateStoreDto,
    responses(
        (status = 201, description = "Store created", body = StoreDto),
        (status = 400, description = "Empty or duplicate name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_store(
    State(state): State<AppState>,
    session: Session,
    Json(store): Json<CreateStoreDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let store = SettingsService::new(&state.db).add_store(&store.name).await?;

    Ok((StatusCode::CREATED, Json(store)))
}

/// Remove a store
#[utoipa::path(
    delete,
    path = "/api/settings/stores/{id}",
    tag = SETTINGS_TAG,
    params(("id" = i32, Path, description = "Store ID")),
    responses(
        (status = 204, description = "Store removed"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Store not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_store(
    State(state): State<AppState>,
    session: Session,
    Path(store_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    SettingsService::new(&state.db).remove_store(store_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Revoke one of the logged in user's devices, ending its sessions
#[utoipa::path(
    delete,
    path = "/api/settings/devices/{id}",
    tag = SETTINGS_TAG,
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 204, description = "Device revoked"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Device not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn revoke_device(
    State(state): State<AppState>,
    session: Session,
    Path(device_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    AuthService::new(&state.db)
        .revoke_device(user.user.id, device_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
