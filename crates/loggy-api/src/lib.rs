//! # loggy-api
//!
//! HTTP API layer for Loggy built on Axum.
//!
//! Provides the `/api` endpoints, the HTML shell and static file serving,
//! middleware (token identification, CORS, request logging), extractors
//! that turn rejections into JSON errors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server, shutdown_signal};
pub use state::AppState;
