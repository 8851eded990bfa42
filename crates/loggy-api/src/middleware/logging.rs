//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use loggy_service::RequestContext;

/// Logs request method, path, status, duration, and the caller if known.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let person_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.person_id.value());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %uri.path(),
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        person_id = ?person_id,
        "HTTP request"
    );

    response
}
