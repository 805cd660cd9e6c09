use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        planning::{AssignSlotDto, ClearSlotDto, MealPlanEntryDto, UpdateDinersDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::planning::PlanningService,
    },
};

pub static PLANNING_TAG: &str = "planning";

#[derive(Deserialize, IntoParams)]
pub struct DateRangeParams {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

/// List meal plan entries between two dates
#[utoipa::path(
    get,
    path = "/api/planning",
    tag = PLANNING_TAG,
    params(DateRangeParams),
    responses(
        (status = 200, description = "Meal plan entries", body = Vec<MealPlanEntryDto>),
        (status = 400, description = "Start after end", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_planning(
    State(state): State<AppState>,
    session: Session,
    Query(range): Query<DateRangeParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let entries = PlanningService::new(&state.db)
        .list(range.start, range.end)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

/// Assign a recipe to a slot, replacing the current one
#[utoipa::path(
    post,
    path = "/api/planning/assign",
    tag = PLANNING_TAG,
    request_body = AssignSlotDto,
    responses(
        (status = 200, description = "Slot assigned", body = MealPlanEntryDto),
        (status = 400, description = "Negative diner count", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_slot(
    State(state): State<AppState>,
    session: Session,
    Json(assignment): Json<AssignSlotDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let entry = PlanningService::new(&state.db).assign(assignment).await?;

    Ok((StatusCode::OK, Json(entry)))
}

/// Empty a slot
#[utoipa::path(
    post,
    path = "/api/planning/clear",
    tag = PLANNING_TAG,
    request_body = ClearSlotDto,
    responses(
        (status = 204, description = "Slot empty"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_slot(
    State(state): State<AppState>,
    session: Session,
    Json(slot): Json<ClearSlotDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    PlanningService::new(&state.db)
        .clear(slot.date, slot.slot)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change the number of diners of a planned slot
#[utoipa::path(
    patch,
    path = "/api/planning/diners",
    tag = PLANNING_TAG,
    request_body = UpdateDinersDto,
    responses(
        (status = 204, description = "Diner count updated, or slot not planned"),
        (status = 400, description = "Negative diner count", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_diners(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<UpdateDinersDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    PlanningService::new(&state.db)
        .update_diner_count(update.date, update.slot, update.diner_count)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
