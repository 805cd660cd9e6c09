use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        freezer::{
            CreateContainerDto, CreateFreezerItemDto, DrawerDto, ExpiringItemsDto, FreezerDto,
            FreezerItemDto, FreezerItemSort, FreezerItemType, LocatedFreezerItemDto,
            MoveFreezerItemDto, UpdateContainerDto, UpdateFreezerItemDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        data::freezer::freezer_item::FreezerItemFilter,
        error::Error,
        model::app::AppState,
        service::freezer::FreezerService,
    },
};

pub static FREEZER_TAG: &str = "freezer";

#[derive(Deserialize, IntoParams)]
pub struct FreezerItemParams {
    #[serde(rename = "type")]
    pub item_type: Option<FreezerItemType>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    pub freezer_id: Option<i32>,
    #[serde(default)]
    pub sort: FreezerItemSort,
}

/// List freezers with their drawers and items
#[utoipa::path(
    get,
    path = "/api/freezers",
    tag = FREEZER_TAG,
    responses(
        (status = 200, description = "Freezers in order", body = Vec<FreezerDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_freezers(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let freezers = FreezerService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(freezers)))
}

/// Add a freezer after the existing ones
#[utoipa::path(
    post,
    path = "/api/freezers",
    tag = FREEZER_TAG,
    request_body = CreateContainerDto,
    responses(
        (status = 201, description = "Freezer created", body = FreezerDto),
        (status = 400, description = "Empty name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_freezer(
    State(state): State<AppState>,
    session: Session,
    Json(freezer): Json<CreateContainerDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let freezer = FreezerService::new(&state.db)
        .create_freezer(&freezer.name)
        .await?;

    Ok((StatusCode::CREATED, Json(freezer)))
}

/// Rename or reorder a freezer
#[utoipa::path(
    patch,
    path = "/api/freezers/{id}",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer ID")),
    request_body = UpdateContainerDto,
    responses(
        (status = 200, description = "Freezer updated", body = FreezerDto),
        (status = 400, description = "Empty name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Freezer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_freezer(
    State(state): State<AppState>,
    session: Session,
    Path(freezer_id): Path<i32>,
    Json(changes): Json<UpdateContainerDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let freezer = FreezerService::new(&state.db)
        .update_freezer(freezer_id, changes)
        .await?;

    Ok((StatusCode::OK, Json(freezer)))
}

/// Delete a freezer with its drawers and items
#[utoipa::path(
    delete,
    path = "/api/freezers/{id}",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer ID")),
    responses(
        (status = 204, description = "Freezer deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Freezer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_freezer(
    State(state): State<AppState>,
    session: Session,
    Path(freezer_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    FreezerService::new(&state.db)
        .delete_freezer(freezer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the drawers of a freezer with their items
#[utoipa::path(
    get,
    path = "/api/freezers/{id}/drawers",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer ID")),
    responses(
        (status = 200, description = "Drawers in order", body = Vec<DrawerDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Freezer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_drawers(
    State(state): State<AppState>,
    session: Session,
    Path(freezer_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let drawers = FreezerService::new(&state.db)
        .list_drawers(freezer_id)
        .await?;

    Ok((StatusCode::OK, Json(drawers)))
}

/// Add a drawer after the existing drawers of a freezer
#[utoipa::path(
    post,
    path = "/api/freezers/{id}/drawers",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer ID")),
    request_body = CreateContainerDto,
    responses(
        (status = 201, description = "Drawer created", body = DrawerDto),
        (status = 400, description = "Empty name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Freezer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_drawer(
    State(state): State<AppState>,
    session: Session,
    Path(freezer_id): Path<i32>,
    Json(drawer): Json<CreateContainerDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let drawer = FreezerService::new(&state.db)
        .create_drawer(freezer_id, &drawer.name)
        .await?;

    Ok((StatusCode::CREATED, Json(drawer)))
}

/// Rename or reorder a drawer
#[utoipa::path(
    patch,
    path = "/api/freezers/{id}/drawers/{drawer_id}",
    tag = FREEZER_TAG,
    params(
        ("id" = i32, Path, description = "Freezer ID"),
        ("drawer_id" = i32, Path, description = "Drawer ID")
    ),
    request_body = UpdateContainerDto,
    responses(
        (status = 200, description = "Drawer updated", body = DrawerDto),
        (status = 400, description = "Empty name", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Drawer not found in this freezer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_drawer(
    State(state): State<AppState>,
    session: Session,
    Path((freezer_id, drawer_id)): Path<(i32, i32)>,
    Json(changes): Json<UpdateContainerDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let drawer = FreezerService::new(&state.db)
        .update_drawer(freezer_id, drawer_id, changes)
        .await?;

    Ok((StatusCode::OK, Json(drawer)))
}

/// Delete a drawer with its items
#[utoipa::path(
    delete,
    path = "/api/freezers/{id}/drawers/{drawer_id}",
    tag = FREEZER_TAG,
    params(
        ("id" = i32, Path, description = "Freezer ID"),
        ("drawer_id" = i32, Path, description = "Drawer ID")
    ),
    responses(
        (status = 204, description = "Drawer deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Drawer not found in this freezer", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_drawer(
    State(state): State<AppState>,
    session: Session,
    Path((freezer_id, drawer_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    FreezerService::new(&state.db)
        .delete_drawer(freezer_id, drawer_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List freezer items with optional filters
#[utoipa::path(
    get,
    path = "/api/freezer-items",
    tag = FREEZER_TAG,
    params(FreezerItemParams),
    responses(
        (status = 200, description = "Matching items", body = Vec<LocatedFreezerItemDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_items(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<FreezerItemParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let items = FreezerService::new(&state.db)
        .list_items(FreezerItemFilter {
            item_type: params.item_type.map(|item_type| item_type.to_string()),
            search: params.search,
            freezer_id: params.freezer_id,
            sort: params.sort,
        })
        .await?;

    Ok((StatusCode::OK, Json(items)))
}

/// Store a new item in a drawer
#[utoipa::path(
    post,
    path = "/api/freezer-items",
    tag = FREEZER_TAG,
    request_body = CreateFreezerItemDto,
    responses(
        (status = 201, description = "Item created", body = FreezerItemDto),
        (status = 400, description = "Empty title or invalid quantity", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Drawer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    session: Session,
    Json(item): Json<CreateFreezerItemDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let item = FreezerService::new(&state.db).create_item(item).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Edit a freezer item
#[utoipa::path(
    patch,
    path = "/api/freezer-items/{id}",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer item ID")),
    request_body = UpdateFreezerItemDto,
    responses(
        (status = 200, description = "Item updated", body = FreezerItemDto),
        (status = 400, description = "Empty title or invalid quantity", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Item or drawer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(changes): Json<UpdateFreezerItemDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let item = FreezerService::new(&state.db)
        .update_item(item_id, changes)
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Remove an item from the freezer
#[utoipa::path(
    delete,
    path = "/api/freezer-items/{id}",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    FreezerService::new(&state.db).delete_item(item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Move an item to another drawer
#[utoipa::path(
    post,
    path = "/api/freezer-items/{id}/move",
    tag = FREEZER_TAG,
    params(("id" = i32, Path, description = "Freezer item ID")),
    request_body = MoveFreezerItemDto,
    responses(
        (status = 200, description = "Item moved", body = FreezerItemDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Item or target drawer not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn move_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(target): Json<MoveFreezerItemDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let item = FreezerService::new(&state.db)
        .move_item(item_id, target.drawer_id)
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Items expiring within the configured window, and items already expired
#[utoipa::path(
    get,
    path = "/api/freezer-items/expiring",
    tag = FREEZER_TAG,
    responses(
        (status = 200, description = "Expiring and expired items", body = ExpiringItemsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn expiring_items(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let items = FreezerService::new(&state.db)
        .expiring(
            Local::now().date_naive(),
            state.settings.freezer_expiry_window_days,
        )
        .await?;

    Ok((StatusCode::OK, Json(items)))
}
