use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder::{
    model::planning::{AssignSlotDto, ClearSlotDto, MealSlot},
    server::{
        controller::planning::{assign_slot, clear_slot, get_planning, DateRangeParams},
        model::app::AppState,
    },
};
use larder_test_utils::prelude::*;

use super::body_json;
use crate::util::{login_as, october, TestResult};

mod get_planning {
    use super::*;

    /// Expect 400 when start is after end
    #[tokio::test]
    async fn rejects_inverted_range() -> TestResult {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await?;
        login_as(&test, "alice").await?;
        let state: AppState = test.to_app_state();

        let result = get_planning(
            State(state),
            test.session.clone(),
            Query(DateRangeParams {
                start: october(25),
                end: october(19),
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod assign_slot {
    use super::*;

    /// Expect 200 with the planned recipe
    #[tokio::test]
    async fn returns_entry() -> TestResult {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await?;
        login_as(&test, "alice").await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        let state: AppState = test.to_app_state();

        let result = assign_slot(
            State(state),
            test.session.clone(),
            Json(AssignSlotDto {
                date: october(19),
                slot: MealSlot::Evening,
                recipe_id: recipe.id,
                diner_count: 3,
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["slot"], "evening");
        assert_eq!(body["recipe"]["title"], "Gratin");

        Ok(())
    }

    /// Expect 401 without a session
    #[tokio::test]
    async fn requires_session() -> TestResult {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        let state: AppState = test.to_app_state();

        let result = assign_slot(
            State(state),
            test.session.clone(),
            Json(AssignSlotDto {
                date: october(19),
                slot: MealSlot::Evening,
                recipe_id: recipe.id,
                diner_count: 3,
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

mod clear_slot {
    use super::*;

    /// Expect 204 for a slot with nothing planned
    #[tokio::test]
    async fn succeeds_on_empty_slot() -> TestResult {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await?;
        login_as(&test, "alice").await?;
        let state: AppState = test.to_app_state();

        let result = clear_slot(
            State(state),
            test.session.clone(),
            Json(ClearSlotDto {
                date: october(19),
                slot: MealSlot::Midday,
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        Ok(())
    }
}
