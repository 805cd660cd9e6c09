use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use larder::{
    model::shopping::{GenerateShoppingListDto, SetPurchasedDto},
    server::{
        controller::shopping::{
            generate_shopping_list, get_latest_shopping_list, set_item_purchased,
        },
        model::app::AppState,
    },
};
use larder_test_utils::prelude::*;

use super::body_json;
use crate::util::{login_as, october, TestResult};

async fn setup() -> TestResult<TestContext> {
    let test = TestBuilder::new()
        .with_all_tables()
        .with_units()
        .build()
        .await?;
    login_as(&test, "alice").await?;

    Ok(test)
}

mod generate_shopping_list {
    use super::*;

    /// Expect 201 with the aggregated list
    #[tokio::test]
    async fn returns_created() -> TestResult {
        let test = setup().await?;
        let butter = test.recipe().insert_ingredient("beurre", "g").await?;
        let cake = test.recipe().insert_recipe("Gâteau").await?;
        test.recipe().insert_line(cake.id, butter.id, 25.0, "g").await?;
        test.planning()
            .insert_entry(october(19), "midday", 4, Some(cake.id))
            .await?;
        let state: AppState = test.to_app_state();

        let result = generate_shopping_list(
            State(state),
            test.session.clone(),
            Json(GenerateShoppingListDto {
                start_date: october(19),
                end_date: october(25),
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["stores"][0]["sections"][0]["lines"][0]["display"], "100 g");

        Ok(())
    }
}

mod get_latest_shopping_list {
    use super::*;

    /// Expect 404 when no list was generated
    #[tokio::test]
    async fn returns_not_found_without_lists() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = get_latest_shopping_list(State(state), test.session.clone()).await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod set_item_purchased {
    use super::*;

    /// Expect 404 for an unknown item
    #[tokio::test]
    async fn returns_not_found_for_unknown_item() -> TestResult {
        let test = setup().await?;
        let state: AppState = test.to_app_state();

        let result = set_item_purchased(
            State(state),
            test.session.clone(),
            Path(77),
            Json(SetPurchasedDto { purchased: true }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
