//! Token identification middleware.
//!
//! Runs on every request. A valid token in the `authorization` header puts a
//! [`RequestContext`] into the request extensions; anything else leaves the
//! request anonymous. Rejecting anonymous requests is the job of the
//! [`AuthUser`](crate::extractors::AuthUser) extractor on protected routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use loggy_service::RequestContext;

use crate::state::AppState;

/// Attaches the verified identity, if any, to the request.
pub async fn identify(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let context = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|token| !token.is_empty())
        .and_then(|token| state.account_service.authenticate(token));

    if let Some(context) = context {
        request.extensions_mut().insert::<RequestContext>(context);
    }

    next.run(request).await
}
