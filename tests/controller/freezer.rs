use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder::{
    model::freezer::{CreateContainerDto, CreateFreezerItemDto, FreezerItemType},
    server::{
        controller::freezer::{create_freezer, create_item, delete_item, expiring_items},
        model::app::AppState,
    },
};
use larder_test_utils::prelude::*;

use super::body_json;
use crate::util::{login_as, october, TestResult};

async fn setup() -> TestResult<TestContext> {
    let test = TestBuilder::new()
        .with_freezer_tables()
        .with_auth_tables()
        .build()
        .await?;
    login_as(&test, "alice").await?;

    Ok(test)
}

mod create_freezer {
    use super::*;

    /// Expect 201 with an empty freezer
    #[tokio::test]
    async fn returns_created() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = create_freezer(
            State(state),
            test.session.clone(),
            Json(CreateContainerDto {
                name: "Cuisine".to_string(),
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["name"], "Cuisine");

        Ok(())
    }

    /// Expect 400 for a blank name
    #[tokio::test]
    async fn rejects_blank_name() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = create_freezer(
            State(state),
            test.session.clone(),
            Json(CreateContainerDto {
                name: String::new(),
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod create_item {
    use super::*;

    /// Expect 404 for an unknown drawer
    #[tokio::test]
    async fn rejects_unknown_drawer() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = create_item(
            State(state),
            test.session.clone(),
            Json(CreateFreezerItemDto {
                title: "Glace".to_string(),
                item_type: FreezerItemType::Dessert,
                quantity: None,
                expiration_date: october(30),
                drawer_id: 3,
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod delete_item {
    use super::*;

    /// Expect 204 then 404 on a second deletion
    #[tokio::test]
    async fn deletes_once() -> TestResult {
        let test = setup().await?;
        let freezer = test.freezer().insert_freezer("Cuisine", 0).await?;
        let drawer = test.freezer().insert_drawer(freezer.id, "Haut", 0).await?;
        let item = test
            .freezer()
            .insert_item(drawer.id, "Pain", "aliment_brut", october(30))
            .await?;
        let state: AppState = test.to_app_state();

        let first = delete_item(State(state.clone()), test.session.clone(), Path(item.id)).await;
        let second = delete_item(State(state), test.session.clone(), Path(item.id)).await;

        assert_eq!(first.unwrap().into_response().status(), StatusCode::NO_CONTENT);
        assert_eq!(
            second.err().unwrap().into_response().status(),
            StatusCode::NOT_FOUND
        );

        Ok(())
    }
}

mod expiring_items {
    use super::*;

    /// Expect 200 with an empty report for an empty freezer
    #[tokio::test]
    async fn reports_nothing_when_empty() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = expiring_items(State(state), test.session.clone()).await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["total_urgent"], 0);

        Ok(())
    }
}
