//! Helpers shared by integration tests.

use chrono::{Duration, NaiveDate};
use larder::{
    model::recipe::{IngredientLineInputDto, RecipeInputDto},
    server::model::session::SessionToken,
};
use larder_test_utils::prelude::*;

pub static TEST_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) larder-tests";
pub static TEST_TOKEN: &str = "test-session-token";

/// Day `day` of October 2026
pub fn october(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

/// Ingredient line with no store section or store
pub fn line(name: &str, qty_per_serving: f64, unit_code: &str) -> IngredientLineInputDto {
    IngredientLineInputDto {
        name: name.to_string(),
        qty_per_serving,
        unit_code: unit_code.to_string(),
        store_section: None,
        store_name: None,
    }
}

/// Recipe input with a title and ingredient lines, everything else defaulted
pub fn recipe_input(title: &str, lines: Vec<IngredientLineInputDto>) -> RecipeInputDto {
    RecipeInputDto {
        title: title.to_string(),
        ingredients: lines,
        ..Default::default()
    }
}

/// Result type of integration tests, mixing fixture and server errors
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Insert a user with a device and a valid session, then put the session token in the cookie
/// session
///
/// Requires the auth tables.
pub async fn login_as(test: &TestContext, username: &str) -> TestResult<entity::user::Model> {
    let user = test.auth().insert_user(username, "correct horse").await?;
    let device = test
        .auth()
        .insert_device(user.id, &format!("fingerprint-{}", username), "Laptop")
        .await?;
    test.auth()
        .insert_session(user.id, device.id, TEST_TOKEN, Duration::days(1))
        .await?;

    SessionToken::insert(&test.session, TEST_TOKEN).await?;

    Ok(user)
}
