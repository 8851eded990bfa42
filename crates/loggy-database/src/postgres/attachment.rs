//! Attachment repository and transaction implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use loggy_core::error::{AppError, ErrorKind};
use loggy_core::result::AppResult;
use loggy_core::types::{AttachmentId, LogEntryId};
use loggy_entity::{ImageAttachment, ImageVersion, NewImage, StoredImage};

use crate::store::{AttachmentStore, AttachmentTransaction};

/// PostgreSQL-backed [`AttachmentStore`].
#[derive(Debug, Clone)]
pub struct PgAttachmentStore {
    pool: PgPool,
}

impl PgAttachmentStore {
    /// Create a new attachment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentStore for PgAttachmentStore {
    async fn begin(&self) -> AppResult<Box<dyn AttachmentTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgAttachmentTransaction { tx }))
    }

    async fn find_image(&self, id: AttachmentId, width: i32) -> AppResult<Option<StoredImage>> {
        sqlx::query_as::<_, StoredImage>(
            "SELECT mime_type, data FROM image WHERE attachment_id = $1 AND width = $2",
        )
        .bind(id)
        .bind(width)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load image", e))
    }

    async fn find_attachment(&self, id: AttachmentId) -> AppResult<Option<ImageAttachment>> {
        let exists: Option<AttachmentId> =
            sqlx::query_scalar("SELECT id FROM image_attachment WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find attachment", e)
                })?;

        if exists.is_none() {
            return Ok(None);
        }

        let versions = sqlx::query_as::<_, ImageVersion>(
            "SELECT mime_type, width, height FROM image WHERE attachment_id = $1 ORDER BY seq",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))?;

        Ok(Some(ImageAttachment { id, versions }))
    }
}

/// An open PostgreSQL transaction for attachment writes.
///
/// sqlx rolls the transaction back when it is dropped uncommitted.
pub struct PgAttachmentTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AttachmentTransaction for PgAttachmentTransaction {
    async fn create_attachment(&mut self, log_entry_id: LogEntryId) -> AppResult<AttachmentId> {
        let id = sqlx::query_scalar::<_, AttachmentId>(
            "INSERT INTO image_attachment (id, log_entry_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(AttachmentId::new())
        .bind(log_entry_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create attachment", e)
        })?;

        debug!(attachment_id = %id, log_entry_id = %log_entry_id, "Attachment row created");
        Ok(id)
    }

    async fn create_image(&mut self, image: &NewImage) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO image (attachment_id, mime_type, width, height, data) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(image.attachment_id)
        .bind(&image.mime_type)
        .bind(image.width)
        .bind(image.height)
        .bind(&image.data)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create image", e))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })
    }
}
