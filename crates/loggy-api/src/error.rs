//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use loggy_core::error::{AppError, ErrorKind};

/// Body of every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Kind name, explicit code, or `internal server error`.
    pub error: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Codec
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);

        if status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    kind = %self.kind,
                    error = %self.message,
                    source = %source,
                    "Request failed"
                ),
                None => tracing::error!(kind = %self.kind, error = %self.message, "Request failed"),
            }
        } else {
            tracing::debug!(kind = %self.kind, error = %self.message, "Request rejected");
        }

        let body = ApiErrorResponse {
            error: self.public_name().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use loggy_core::error::codes;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_use_kind_name() {
        let (status, body) = body_of(AppError::not_found("Log entry 4 not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "NotFound" }));

        let (status, body) = body_of(AppError::unauthorized("bad token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_code_replaces_kind_name() {
        let err = AppError::bad_request("Email already registered").with_code(codes::EMAIL_TAKEN);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "email-taken");
    }

    #[tokio::test]
    async fn test_server_faults_hide_details() {
        let (status, body) = body_of(AppError::database("relation \"image\" does not exist")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "internal server error" }));
    }
}
