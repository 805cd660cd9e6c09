use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder::server::{
    controller::recipe::{
        create_recipe, delete_recipe, get_recipe, RecipeDeleteParams, RecipeDetailParams,
    },
    model::app::AppState,
};
use larder_test_utils::prelude::*;

use super::body_json;
use crate::util::{line, login_as, october, recipe_input, TestResult};

async fn setup() -> TestResult<TestContext> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_units()
        .build()
        .await?;
    login_as(&test, "alice").await?;

    Ok(test)
}

mod create_recipe {
    use super::*;

    /// Expect 201 with the created recipe
    #[tokio::test]
    async fn returns_created() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = create_recipe(
            State(state),
            test.session.clone(),
            Json(recipe_input("Pain", vec![line("farine", 250.0, "g")])),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["slug"], "pain");

        Ok(())
    }

    /// Expect 400 for an unknown unit
    #[tokio::test]
    async fn rejects_unknown_unit() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = create_recipe(
            State(state),
            test.session.clone(),
            Json(recipe_input("Pain", vec![line("farine", 250.0, "oz")])),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod get_recipe {
    use super::*;

    /// Expect 404 for an unknown recipe
    #[tokio::test]
    async fn returns_not_found() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = get_recipe(
            State(state),
            test.session.clone(),
            Path(404),
            Query(RecipeDetailParams { servings: None }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod delete_recipe {
    use super::*;

    /// Expect 409 listing the planned slots
    #[tokio::test]
    async fn conflicts_when_planned() -> TestResult {
        let test = setup().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        test.planning()
            .insert_entry(october(19), "midday", 2, Some(recipe.id))
            .await?;
        test.planning()
            .insert_entry(october(21), "evening", 2, Some(recipe.id))
            .await?;
        let state: AppState = test.to_app_state();

        let result = delete_recipe(
            State(state),
            test.session.clone(),
            Path(recipe.id),
            Query(RecipeDeleteParams { force: false }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["affected_plans"].as_array().unwrap().len(), 2);

        Ok(())
    }

    /// Expect 204 when forced despite planned slots
    #[tokio::test]
    async fn deletes_when_forced() -> TestResult {
        let test = setup().await?;
        let recipe = test.recipe().insert_recipe("Gratin").await?;
        test.planning()
            .insert_entry(october(19), "midday", 2, Some(recipe.id))
            .await?;
        let state: AppState = test.to_app_state();

        let result = delete_recipe(
            State(state),
            test.session.clone(),
            Path(recipe.id),
            Query(RecipeDeleteParams { force: true }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        Ok(())
    }
}
