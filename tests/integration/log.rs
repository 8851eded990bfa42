//! Posting entries and reading the feed over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_feed_is_newest_first_and_private() {
    let app = TestApp::new();
    let alice = app.create_account("alice@example.com").await;
    let bob = app.create_account("bob@example.com").await;

    app.post_entry(&alice, "first").await;
    app.post_entry(&bob, "bob's").await;
    app.post_entry(&alice, "second").await;

    let response = app.request("GET", "/api/log", None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    let texts: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["textContent"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[tokio::test]
async fn test_created_entry_shape() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/log",
            Some(json!({ "textContent": "hello", "longitude": -0.1276, "latitude": 51.5072 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let entry = &response.body;
    assert!(entry["id"].is_i64());
    assert_eq!(entry["textContent"], "hello");
    assert_eq!(entry["longitude"], -0.1276);
    assert_eq!(entry["latitude"], 51.5072);
    assert!(entry["createdAt"].is_string());
    assert_eq!(entry["imageAttachments"], json!([]));
    assert!(entry.get("personId").is_none());
}

#[tokio::test]
async fn test_log_requires_token() {
    let app = TestApp::new();

    let feed = app.request("GET", "/api/log", None, None).await;
    assert_eq!(feed.status, StatusCode::UNAUTHORIZED);

    let post = app
        .request(
            "POST",
            "/api/log",
            Some(json!({ "textContent": "x", "longitude": 0.0, "latitude": 0.0 })),
            None,
        )
        .await;
    assert_eq!(post.status, StatusCode::UNAUTHORIZED);
    assert_eq!(post.body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_missing_coordinates_is_bad_request() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/log",
            Some(json!({ "textContent": "nowhere" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BadRequest");
}
