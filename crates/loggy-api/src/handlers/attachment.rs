//! Attachment handlers: upload and versioned retrieval.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use loggy_core::error::AppError;
use loggy_core::types::{AttachmentId, LogEntryId};
use loggy_entity::ImageAttachment;
use loggy_service::ImageUpload;

use crate::extractors::{ApiMultipart, ApiPath, AuthUser};
use crate::state::AppState;

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// POST /api/log/{logEntryId}/attachment
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(log_entry_id): ApiPath<LogEntryId>,
    multipart: ApiMultipart,
) -> Result<Json<ImageAttachment>, AppError> {
    let part = multipart.file(IMAGE_FIELD).await?;
    let upload = ImageUpload {
        content_type: part.content_type,
        data: part.data,
    };

    let attachment = state
        .attachment_service
        .attach(auth.context(), log_entry_id, &upload)
        .await?;
    Ok(Json(attachment))
}

/// GET /api/attachment/{id}/{width}
pub async fn image(
    State(state): State<AppState>,
    ApiPath((id, width)): ApiPath<(AttachmentId, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let image = state.attachment_service.image(id, width).await?;
    Ok((
        [
            (header::CONTENT_TYPE, image.mime_type),
            // Versions never change once written.
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        image.data,
    ))
}
