//! Health, browser error sink, shell and unknown routes.

use axum::http::{StatusCode, header};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_browser_error_accepts_anything() {
    let app = TestApp::new();

    let json_report = app
        .request(
            "POST",
            "/api/browserError",
            Some(json!({ "message": "x is undefined", "stack": "at main.js:1" })),
            None,
        )
        .await;
    assert_eq!(json_report.status, StatusCode::OK);
    assert!(json_report.bytes.is_empty());

    let text_report = app
        .request_raw("POST", "/api/browserError", "text/plain", b"oops".to_vec(), None)
        .await;
    assert_eq!(text_report.status, StatusCode::OK);
}

#[tokio::test]
async fn test_client_routes_get_html_shell() {
    let app = TestApp::new();
    let response = app.request("GET", "/entries/42", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = String::from_utf8(response.bytes).unwrap();
    assert!(html.contains(r#"<script src="/static/index.js"></script>"#));
}

#[tokio::test]
async fn test_unknown_api_route_is_json_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "NotFound" }));
}
