use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use larder::{
    model::auth::LoginDto,
    server::{
        controller::auth::{get_user, login, logout},
        model::{app::AppState, session::SessionToken},
    },
};
use larder_test_utils::prelude::*;

use super::body_json;
use crate::util::{login_as, TestResult, TEST_USER_AGENT};

fn user_agent_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

mod login {
    use super::*;

    /// Expect 200 and the session token stored in the cookie session
    #[tokio::test]
    async fn stores_token_in_session() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let state: AppState = test.to_app_state();

        let result = login(
            State(state),
            test.session.clone(),
            user_agent_headers(),
            Json(LoginDto {
                username: "alice".to_string(),
                password: "correct horse".to_string(),
                device_name: Some("Cuisine".to_string()),
            }),
        )
        .await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(SessionToken::get(&test.session).await?.is_some());

        Ok(())
    }

    /// Expect 400 with needs_device_name for a new device without a name
    #[tokio::test]
    async fn asks_for_device_name() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let state: AppState = test.to_app_state();

        let result = login(
            State(state),
            test.session.clone(),
            user_agent_headers(),
            Json(LoginDto {
                username: "alice".to_string(),
                password: "correct horse".to_string(),
                device_name: None,
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["needs_device_name"], true);

        Ok(())
    }

    /// Expect 401 for a wrong password
    #[tokio::test]
    async fn rejects_wrong_password() -> TestResult {
        let test = TestBuilder::new()
            .with_auth_tables()
            .with_user("alice", "correct horse")
            .build()
            .await?;
        let state: AppState = test.to_app_state();

        let result = login(
            State(state),
            test.session.clone(),
            user_agent_headers(),
            Json(LoginDto {
                username: "alice".to_string(),
                password: "wrong".to_string(),
                device_name: Some("Cuisine".to_string()),
            }),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

mod get_user {
    use super::*;

    /// Expect 200 with the logged in user
    #[tokio::test]
    async fn returns_user() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        login_as(&test, "alice").await?;
        let state: AppState = test.to_app_state();

        let result = get_user(State(state), test.session.clone()).await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["device"]["device_name"], "Laptop");

        Ok(())
    }

    /// Expect 401 without a session token
    #[tokio::test]
    async fn rejects_anonymous_request() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let state: AppState = test.to_app_state();

        let result = get_user(State(state), test.session.clone()).await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    /// Expect 401 and the cookie session flushed when the token is unknown
    #[tokio::test]
    async fn flushes_unknown_token() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        SessionToken::insert(&test.session, "forgotten").await?;
        let state: AppState = test.to_app_state();

        let result = get_user(State(state), test.session.clone()).await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(SessionToken::get(&test.session).await?.is_none());

        Ok(())
    }
}

mod logout {
    use super::*;

    /// Expect 204 and the session no longer usable
    #[tokio::test]
    async fn ends_session() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        login_as(&test, "alice").await?;
        let state: AppState = test.to_app_state();

        let result = logout(State(state.clone()), test.session.clone()).await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let after = get_user(State(state), test.session.clone()).await;
        assert!(after.is_err());

        Ok(())
    }

    /// Expect 204 even without a session
    #[tokio::test]
    async fn succeeds_without_session() -> TestResult {
        let test = TestBuilder::new().with_auth_tables().build().await?;
        let state: AppState = test.to_app_state();

        let result = logout(State(state), test.session.clone()).await;

        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        Ok(())
    }
}
