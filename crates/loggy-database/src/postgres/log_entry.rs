//! Log entry repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use loggy_core::error::{AppError, ErrorKind};
use loggy_core::result::AppResult;
use loggy_core::types::{LogEntryId, PersonId};
use loggy_entity::{LogEntry, NewLogEntry};

use crate::feed::{FeedRow, fold_rows};
use crate::store::LogEntryStore;

const FEED_QUERY: &str = "\
    SELECT \
        log_entry.id, \
        log_entry.person_id, \
        log_entry.text_content, \
        log_entry.created_at, \
        log_entry.longitude, \
        log_entry.latitude, \
        image_attachment.id AS attachment_id, \
        image.mime_type AS image_mime_type, \
        image.width AS image_width, \
        image.height AS image_height \
    FROM log_entry \
    LEFT JOIN image_attachment ON image_attachment.log_entry_id = log_entry.id \
    LEFT JOIN image ON image.attachment_id = image_attachment.id \
    WHERE log_entry.person_id = $1 \
    ORDER BY log_entry.created_at DESC, log_entry.id DESC, image_attachment.seq, image.seq";

/// PostgreSQL-backed [`LogEntryStore`].
#[derive(Debug, Clone)]
pub struct PgLogEntryStore {
    pool: PgPool,
}

impl PgLogEntryStore {
    /// Create a new log entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogEntryStore for PgLogEntryStore {
    async fn find_by_id(&self, id: LogEntryId) -> AppResult<Option<LogEntry>> {
        sqlx::query_as::<_, LogEntry>(
            "SELECT id, person_id, text_content, created_at, longitude, latitude \
             FROM log_entry WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find log entry", e))
    }

    async fn create(&self, data: &NewLogEntry) -> AppResult<LogEntry> {
        sqlx::query_as::<_, LogEntry>(
            "INSERT INTO log_entry (person_id, text_content, longitude, latitude) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, person_id, text_content, created_at, longitude, latitude",
        )
        .bind(data.person_id)
        .bind(&data.text_content)
        .bind(data.longitude)
        .bind(data.latitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create log entry", e))
    }

    async fn feed(&self, person_id: PersonId) -> AppResult<Vec<LogEntry>> {
        let rows = sqlx::query_as::<_, FeedRow>(FEED_QUERY)
            .bind(person_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load log entries", e)
            })?;

        Ok(fold_rows(rows))
    }
}
