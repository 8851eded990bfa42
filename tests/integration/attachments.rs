//! Photo upload and versioned retrieval over HTTP.

use axum::http::{StatusCode, header};

use crate::helpers::{TestApp, png};

fn widths(attachment: &serde_json::Value) -> Vec<i64> {
    attachment["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["width"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_upload_builds_ladder_and_serves_versions() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "sunset").await;

    let response = app
        .upload(&entry.to_string(), "image", "image/png", &png(1000, 500), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    let attachment = &response.body;
    assert_eq!(widths(attachment), vec![1000, 320, 600, 800]);
    assert_eq!(attachment["versions"][1]["height"], 160);
    assert_eq!(attachment["versions"][0]["mimeType"], "image/webp");

    let id = attachment["id"].as_str().unwrap();
    let image = app
        .request("GET", &format!("/api/attachment/{id}/320"), None, None)
        .await;
    assert_eq!(image.status, StatusCode::OK);
    assert_eq!(image.headers[header::CONTENT_TYPE], "image/webp");
    assert_eq!(&image.bytes[0..4], b"RIFF");
    assert_eq!(&image.bytes[8..12], b"WEBP");
}

#[tokio::test]
async fn test_retrieval_requires_exact_width() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "small").await;

    let response = app
        .upload(&entry.to_string(), "image", "image/png", &png(400, 300), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(widths(&response.body), vec![400, 320]);

    let id = response.body["id"].as_str().unwrap();
    let missing = app
        .request("GET", &format!("/api/attachment/{id}/600"), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NotFound");
}

#[tokio::test]
async fn test_feed_lists_attachments() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "with photo").await;
    app.upload(&entry.to_string(), "image", "image/png", &png(700, 350), &token)
        .await;

    let feed = app.request("GET", "/api/log", None, Some(&token)).await;
    let attachments = feed.body[0]["imageAttachments"].as_array().unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(widths(&attachments[0]), vec![700, 320, 600]);
}

#[tokio::test]
async fn test_unsupported_type_writes_nothing() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "gif").await;

    let response = app
        .upload(&entry.to_string(), "image", "image/gif", b"GIF89a", &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BadRequest");
    assert_eq!(app.store.attachment_count().await, 0);
    assert_eq!(app.store.image_count().await, 0);
}

#[tokio::test]
async fn test_undecodable_upload_writes_nothing() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "corrupt").await;

    let response = app
        .upload(&entry.to_string(), "image", "image/jpeg", b"definitely not a jpeg", &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.attachment_count().await, 0);
}

#[tokio::test]
async fn test_cannot_attach_to_someone_elses_entry() {
    let app = TestApp::new();
    let alice = app.create_account("alice@example.com").await;
    let bob = app.create_account("bob@example.com").await;
    let entry = app.post_entry(&alice, "alice only").await;

    let response = app
        .upload(&entry.to_string(), "image", "image/png", &png(50, 50), &bob)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.attachment_count().await, 0);

    let absent = app
        .upload("999999", "image", "image/png", &png(50, 50), &alice)
        .await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_image_field_is_bad_request() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "no field").await;

    let response = app
        .upload(&entry.to_string(), "photo", "image/png", &png(10, 10), &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BadRequest");
}

#[tokio::test]
async fn test_bad_path_parameters_are_bad_request() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;

    let entry = app
        .upload("abc", "image", "image/png", &png(10, 10), &token)
        .await;
    assert_eq!(entry.status, StatusCode::BAD_REQUEST);
    assert_eq!(entry.body["error"], "BadRequest");

    let id = app
        .request("GET", "/api/attachment/not-a-uuid/320", None, None)
        .await;
    assert_eq!(id.status, StatusCode::BAD_REQUEST);

    let width = app
        .request(
            "GET",
            "/api/attachment/7f1d9c8e-2b1a-4c3d-9e8f-0a1b2c3d4e5f/wide",
            None,
            None,
        )
        .await;
    assert_eq!(width.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = TestApp::new();
    let token = app.create_account("alice@example.com").await;
    let entry = app.post_entry(&token, "anon").await;

    let response = app
        .upload(&entry.to_string(), "image", "image/png", &png(10, 10), "1:0:bogus")
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
