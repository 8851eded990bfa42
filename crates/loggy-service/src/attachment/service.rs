//! Attachment use cases exposed to the HTTP layer.

use std::sync::Arc;

use loggy_core::error::AppError;
use loggy_core::result::AppResult;
use loggy_core::types::{AttachmentId, LogEntryId};
use loggy_database::store::AttachmentStore;
use loggy_entity::{ImageAttachment, StoredImage};

use super::pipeline::{ImageUpload, IngestPipeline};
use crate::context::RequestContext;
use crate::log::LogService;

/// Attaches photos to the caller's entries and serves stored versions.
#[derive(Debug, Clone)]
pub struct AttachmentService {
    log: Arc<LogService>,
    pipeline: Arc<IngestPipeline>,
    attachments: Arc<dyn AttachmentStore>,
}

impl AttachmentService {
    /// Creates a new attachment service.
    pub fn new(
        log: Arc<LogService>,
        pipeline: Arc<IngestPipeline>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            log,
            pipeline,
            attachments,
        }
    }

    /// Attach `upload` to one of the caller's entries.
    ///
    /// An entry the caller does not own is reported as `NotFound`.
    pub async fn attach(
        &self,
        ctx: &RequestContext,
        log_entry_id: LogEntryId,
        upload: &ImageUpload,
    ) -> AppResult<ImageAttachment> {
        let entry = self.log.find_owned(ctx, log_entry_id).await?;
        self.pipeline.ingest(upload, entry.id, None).await
    }

    /// The stored version with exactly `width`; no nearest-size fallback.
    pub async fn image(&self, id: AttachmentId, width: i32) -> AppResult<StoredImage> {
        self.attachments
            .find_image(id, width)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No {width}px version of attachment {id}")))
    }
}
