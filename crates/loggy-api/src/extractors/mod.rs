//! Custom Axum extractors.
//!
//! The wrappers here exist so that every rejection leaves as an
//! [`AppError`](loggy_core::error::AppError) with a JSON `error` body.

pub mod auth;
pub mod json;
pub mod multipart;
pub mod path;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use multipart::ApiMultipart;
pub use path::ApiPath;
