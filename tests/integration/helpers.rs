//! Shared test helpers for integration tests.

use std::io::Cursor;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{Value, json};
use tower::ServiceExt;

use loggy_api::AppState;
use loggy_core::config::{
    AppConfig, AuthConfig, DatabaseBackend, DatabaseConfig, LoggingConfig, MediaConfig,
    ServerConfig,
};
use loggy_core::traits::ManualClock;
use loggy_database::Database;
use loggy_database::memory::MemoryStore;

/// Password that satisfies the 12..=64 character rule.
pub const PASSWORD: &str = "correct horse battery";

const BOUNDARY: &str = "loggy-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for direct inspection
    pub store: MemoryStore,
    /// Clock used by the token signer
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: AppConfig,
}

/// Status, headers and body of a test response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body, `Null` if not JSON
    pub body: Value,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store
    pub fn new() -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                backend: DatabaseBackend::Memory,
                ..DatabaseConfig::default()
            },
            auth: AuthConfig::with_key("integration-test-signing-key"),
            media: MediaConfig::default(),
            logging: LoggingConfig::default(),
        };

        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let state = AppState::build(
            config.clone(),
            Database::memory(store.clone()),
            clock.clone(),
        )
        .expect("Failed to build state");
        let router = loggy_api::build_app(state, &config.server.cors);

        Self {
            router,
            store,
            clock,
            config,
        }
    }

    /// Send a request with an optional JSON body and raw `authorization` header
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, token);
        }

        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a raw body with an explicit content type
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, token);
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Upload `data` as multipart field `field` to an entry
    pub async fn upload(
        &self,
        log_entry_id: &str,
        field: &str,
        content_type: &str,
        data: &[u8],
        token: &str,
    ) -> TestResponse {
        self.request_raw(
            "POST",
            &format!("/api/log/{log_entry_id}/attachment"),
            &format!("multipart/form-data; boundary={BOUNDARY}"),
            multipart_body(field, content_type, data),
            Some(token),
        )
        .await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Create an account and return its token
    pub async fn create_account(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/create-account",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in body")
            .to_string()
    }

    /// Post an entry and return its id
    pub async fn post_entry(&self, token: &str, text: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/log",
                Some(json!({ "textContent": text, "longitude": 24.94, "latitude": 60.17 })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["id"].as_i64().expect("id in body")
    }
}

/// PNG of the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 140, 200])))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode png");
    buf
}

fn multipart_body(field: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"photo\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
