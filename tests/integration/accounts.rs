//! Account creation, login and token lifecycle over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_create_account_then_whoami() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;

    let response = app.request("GET", "/api/whoami", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "alice@example.com");
    assert!(response.body["id"].is_i64());
    assert!(response.body.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_email_taken() {
    let app = TestApp::new();
    app.create_account("alice@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/create-account",
            Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "email-taken" }));
}

#[tokio::test]
async fn test_short_password_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/create-account",
            Some(json!({ "email": "bob@example.com", "password": "elevenchars" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BadRequest");
}

#[tokio::test]
async fn test_login_checks_password() {
    let app = TestApp::new();
    app.create_account("alice@example.com").await;

    let ok = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert!(ok.body["token"].is_string());

    let wrong = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "alice@example.com", "password": "incorrect horse battery" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, json!({ "error": "Unauthorized" }));

    let unknown = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .request_raw(
            "POST",
            "/api/login",
            "application/json",
            b"{\"email\": ".to_vec(),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BadRequest");
}

#[tokio::test]
async fn test_refresh_token_requires_identity() {
    let app = TestApp::new();

    let anonymous = app.request("GET", "/api/refresh-token", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body, json!({ "error": "Unauthorized" }));

    let garbage = app
        .request("GET", "/api/refresh-token", None, Some("not-a-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refreshed_token_outlives_original() {
    let app = TestApp::new();
    let original = app.create_account("alice@example.com").await;
    let ttl = app.config.auth.token_ttl_ms;

    app.clock.advance(ttl / 2);
    let response = app
        .request("GET", "/api/refresh-token", None, Some(&original))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let fresh = response.body["token"].as_str().unwrap().to_string();
    assert_ne!(fresh, original);

    app.clock.advance(ttl / 2 + 1);
    let old = app.request("GET", "/api/whoami", None, Some(&original)).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    let new = app.request("GET", "/api/whoami", None, Some(&fresh)).await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_valid_until_ttl_inclusive() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let ttl = app.config.auth.token_ttl_ms;

    app.clock.advance(ttl);
    let at_ttl = app.request("GET", "/api/whoami", None, Some(&token)).await;
    assert_eq!(at_ttl.status, StatusCode::OK);

    app.clock.advance(1);
    let past_ttl = app.request("GET", "/api/whoami", None, Some(&token)).await;
    assert_eq!(past_ttl.status, StatusCode::UNAUTHORIZED);
}
