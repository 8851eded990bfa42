//! Route definitions: the `/api` surface, static files, and the HTML shell.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use tower_http::services::ServeDir;

use loggy_core::error::AppError;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Builds the complete application router.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let api_routes = Router::new()
        .merge(account_routes())
        .merge(log_routes())
        .merge(attachment_routes())
        .route("/browserError", post(handlers::browser_error::report))
        .route("/health", get(handlers::health::health))
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(&server.static_dir))
        .nest_service("/assets", ServeDir::new(&server.assets_dir))
        .fallback(handlers::shell::index)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(from_fn(middleware::logging::request_logging))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth::identify,
        ))
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/create-account", post(handlers::auth::create_account))
        .route("/refresh-token", get(handlers::auth::refresh_token))
        .route("/whoami", get(handlers::auth::whoami))
}

fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/log", get(handlers::log::feed).post(handlers::log::create))
        .route(
            "/log/{logEntryId}/attachment",
            post(handlers::attachment::upload),
        )
}

fn attachment_routes() -> Router<AppState> {
    Router::new().route("/attachment/{id}/{width}", get(handlers::attachment::image))
}

async fn api_not_found() -> AppError {
    AppError::not_found("No such API route")
}
