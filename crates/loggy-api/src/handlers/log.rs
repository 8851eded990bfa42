//! Log entry handlers.

use axum::Json;
use axum::extract::State;

use loggy_core::error::AppError;
use loggy_entity::LogEntry;

use crate::dto::request::CreateLogEntryRequest;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/log
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<LogEntry>>, AppError> {
    let entries = state.log_service.feed(auth.context()).await?;
    Ok(Json(entries))
}

/// POST /api/log
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateLogEntryRequest>,
) -> Result<Json<LogEntry>, AppError> {
    let entry = state
        .log_service
        .create(auth.context(), &req.text_content, req.longitude, req.latitude)
        .await?;
    Ok(Json(entry))
}
