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
        recipe::{RecipeDto, RecipeInUseDto, RecipeInputDto, RecipeSummaryDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::recipe::{RecipeDeletion, RecipeService},
    },
};

pub static RECIPE_TAG: &str = "recipe";

#[derive(Deserialize, IntoParams)]
pub struct RecipeListParams {
    /// Case-insensitive substring of the title
    pub q: Option<String>,
    pub tag: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct RecipeDetailParams {
    /// Scale ingredient quantities to this many servings
    pub servings: Option<i32>,
}

#[derive(Deserialize, IntoParams)]
pub struct RecipeDeleteParams {
    /// Also delete the meal plan entries using the recipe
    #[serde(default)]
    pub force: bool,
}

/// List recipes, optionally searching titles and filtering by tag
#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = RECIPE_TAG,
    params(RecipeListParams),
    responses(
        (status = 200, description = "Recipes ordered by title", body = Vec<RecipeSummaryDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RecipeListParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let recipes = RecipeService::new(&state.db)
        .list(params.q.as_deref(), params.tag.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(recipes)))
}

/// Create a recipe
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = RECIPE_TAG,
    request_body = RecipeInputDto,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDto),
        (status = 400, description = "Invalid recipe", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<RecipeInputDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let recipe = RecipeService::new(&state.db).create(input).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Get a recipe with its steps and ingredients
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID"), RecipeDetailParams),
    responses(
        (status = 200, description = "Recipe", body = RecipeDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    session: Session,
    Path(recipe_id): Path<i32>,
    Query(params): Query<RecipeDetailParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let recipe = RecipeService::new(&state.db)
        .get(recipe_id, params.servings)
        .await?;

    Ok((StatusCode::OK, Json(recipe)))
}

/// Replace the content of a recipe
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = RecipeInputDto,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDto),
        (status = 400, description = "Invalid recipe", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    session: Session,
    Path(recipe_id): Path<i32>,
    Json(input): Json<RecipeInputDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let recipe = RecipeService::new(&state.db)
        .update(recipe_id, input)
        .await?;

    Ok((StatusCode::OK, Json(recipe)))
}

/// Delete a recipe
///
/// Refused with 409 while meal plan entries use the recipe, unless `force=true`, which
/// deletes those entries too.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID"), RecipeDeleteParams),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 409, description = "Recipe is planned", body = RecipeInUseDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    session: Session,
    Path(recipe_id): Path<i32>,
    Query(params): Query<RecipeDeleteParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let recipe_service = RecipeService::new(&state.db);

    if params.force {
        recipe_service.force_delete(recipe_id).await?;

        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    match recipe_service.delete(recipe_id).await? {
        RecipeDeletion::Deleted => Ok(StatusCode::NO_CONTENT.into_response()),
        RecipeDeletion::Blocked(affected_plans) => Ok((
            StatusCode::CONFLICT,
            Json(RecipeInUseDto {
                error: "Recipe is used by the meal plan".to_string(),
                affected_plans,
            }),
        )
            .into_response()),
    }
}
