//! Sink for errors reported by the browser client.

use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::Value;

/// POST /api/browserError
///
/// Accepts any body and answers with an empty 200.
pub async fn report(body: Bytes) -> StatusCode {
    let report = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    tracing::error!(report = %report, "Error from browser");
    StatusCode::OK
}
