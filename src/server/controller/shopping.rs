use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        shopping::{
            DeletedCountDto, GenerateShoppingListDto, SetPurchasedDto, ShoppingItemDto,
            ShoppingListDto,
        },
    },
    server::{
        controller::{planning::DateRangeParams, util::get_user::get_user_from_session},
        error::Error,
        model::app::AppState,
        service::shopping::ShoppingService,
    },
};

pub static SHOPPING_TAG: &str = "shopping";

#[derive(Deserialize, IntoParams)]
pub struct StoreParams {
    /// Store name as shown in the list
    pub store: String,
}

/// Aggregate the ingredients of a date range without saving a list
#[utoipa::path(
    get,
    path = "/api/shopping-list/preview",
    tag = SHOPPING_TAG,
    params(DateRangeParams),
    responses(
        (status = 200, description = "Aggregated list", body = ShoppingListDto),
        (status = 400, description = "Start after end", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn preview_shopping_list(
    State(state): State<AppState>,
    session: Session,
    Query(range): Query<DateRangeParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let list = ShoppingService::new(&state.db)
        .preview(range.start, range.end)
        .await?;

    Ok((StatusCode::OK, Json(list)))
}

/// Generate and save a shopping list for a date range
///
/// Lists older than the retention window are deleted first.
#[utoipa::path(
    post,
    path = "/api/shopping-lists",
    tag = SHOPPING_TAG,
    request_body = GenerateShoppingListDto,
    responses(
        (status = 201, description = "List generated", body = ShoppingListDto),
        (status = 400, description = "Start after end", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_shopping_list(
    State(state): State<AppState>,
    session: Session,
    Json(range): Json<GenerateShoppingListDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let list = ShoppingService::new(&state.db)
        .generate(
            range.start_date,
            range.end_date,
            state.settings.shopping_list_retention_days,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// Get the most recently generated shopping list
#[utoipa::path(
    get,
    path = "/api/shopping-lists/latest",
    tag = SHOPPING_TAG,
    responses(
        (status = 200, description = "Latest list", body = ShoppingListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No list generated yet", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_latest_shopping_list(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let Some(list) = ShoppingService::new(&state.db).latest().await? else {
        return Err(Error::NotFound("No shopping list generated yet".to_string()));
    };

    Ok((StatusCode::OK, Json(list)))
}

/// Get a saved shopping list
#[utoipa::path(
    get,
    path = "/api/shopping-lists/{id}",
    tag = SHOPPING_TAG,
    params(("id" = i32, Path, description = "Shopping list ID")),
    responses(
        (status = 200, description = "Shopping list", body = ShoppingListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Shopping list not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    session: Session,
    Path(list_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let list = ShoppingService::new(&state.db).get(list_id).await?;

    Ok((StatusCode::OK, Json(list)))
}

/// Mark a shopping list item as purchased or not
///
/// Sending the state the item already has changes nothing.
#[utoipa::path(
    patch,
    path = "/api/shopping-list/{item_id}",
    tag = SHOPPING_TAG,
    params(("item_id" = i32, Path, description = "Shopping list item ID")),
    request_body = SetPurchasedDto,
    responses(
        (status = 200, description = "Item state", body = ShoppingItemDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_item_purchased(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(update): Json<SetPurchasedDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let item = ShoppingService::new(&state.db)
        .set_purchased(item_id, update.purchased)
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Delete the purchased items of one store from a saved list
#[utoipa::path(
    delete,
    path = "/api/shopping-lists/{id}/purchased",
    tag = SHOPPING_TAG,
    params(("id" = i32, Path, description = "Shopping list ID"), StoreParams),
    responses(
        (status = 200, description = "Number of deleted items", body = DeletedCountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Shopping list not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_purchased_items(
    State(state): State<AppState>,
    session: Session,
    Path(list_id): Path<i32>,
    Query(params): Query<StoreParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let deleted = ShoppingService::new(&state.db)
        .delete_purchased(list_id, &params.store)
        .await?;

    Ok((StatusCode::OK, Json(DeletedCountDto { deleted })))
}
