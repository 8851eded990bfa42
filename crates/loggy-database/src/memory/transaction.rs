use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use loggy_core::error::AppError;
use loggy_core::result::AppResult;
use loggy_core::types::{AttachmentId, LogEntryId};
use loggy_entity::NewImage;

use super::store::Tables;
use crate::store::AttachmentTransaction;

/// Staged attachment writes against a [`MemoryStore`](super::MemoryStore).
#[derive(Debug)]
pub struct MemoryAttachmentTransaction {
    tables: Arc<RwLock<Tables>>,
    attachments: Vec<(AttachmentId, LogEntryId)>,
    images: Vec<NewImage>,
}

impl MemoryAttachmentTransaction {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self {
            tables,
            attachments: Vec::new(),
            images: Vec::new(),
        }
    }

    fn staged_attachment(&self, id: AttachmentId) -> bool {
        self.attachments.iter().any(|(a, _)| *a == id)
    }

    fn staged_image(&self, id: AttachmentId, width: i32) -> bool {
        self.images
            .iter()
            .any(|i| i.attachment_id == id && i.width == width)
    }
}

#[async_trait]
impl AttachmentTransaction for MemoryAttachmentTransaction {
    async fn create_attachment(&mut self, log_entry_id: LogEntryId) -> AppResult<AttachmentId> {
        if !self.tables.read().await.has_entry(log_entry_id) {
            return Err(AppError::database(format!(
                "image_attachment.log_entry_id references missing entry {log_entry_id}"
            )));
        }

        let id = AttachmentId::new();
        self.attachments.push((id, log_entry_id));
        debug!(attachment_id = %id, log_entry_id = %log_entry_id, "Attachment row staged");
        Ok(id)
    }

    async fn create_image(&mut self, image: &NewImage) -> AppResult<()> {
        let id = image.attachment_id;
        let tables = self.tables.read().await;

        if !self.staged_attachment(id) && !tables.has_attachment(id) {
            return Err(AppError::database(format!(
                "image.attachment_id references missing attachment {id}"
            )));
        }
        if self.staged_image(id, image.width) || tables.has_image(id, image.width) {
            return Err(AppError::database(format!(
                "duplicate image version ({id}, {})",
                image.width
            )));
        }
        drop(tables);

        self.images.push(image.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let this = *self;
        let mut tables = this.tables.write().await;
        tables.attachments.extend(this.attachments);
        tables.images.extend(this.images);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}
