//! Posting entries and reading the feed.

use std::sync::Arc;

use tracing::info;

use loggy_core::error::AppError;
use loggy_core::result::AppResult;
use loggy_core::types::LogEntryId;
use loggy_database::store::LogEntryStore;
use loggy_entity::{LogEntry, NewLogEntry};

use crate::context::RequestContext;

/// Handles log entry creation and the per-person feed.
#[derive(Debug, Clone)]
pub struct LogService {
    entries: Arc<dyn LogEntryStore>,
}

impl LogService {
    /// Creates a new log service.
    pub fn new(entries: Arc<dyn LogEntryStore>) -> Self {
        Self { entries }
    }

    /// The caller's entries, newest first, with attachments.
    pub async fn feed(&self, ctx: &RequestContext) -> AppResult<Vec<LogEntry>> {
        self.entries.feed(ctx.person_id).await
    }

    /// Posts a new entry for the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        text_content: &str,
        longitude: f64,
        latitude: f64,
    ) -> AppResult<LogEntry> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(AppError::bad_request("Coordinates must be finite numbers"));
        }

        let entry = self
            .entries
            .create(&NewLogEntry {
                person_id: ctx.person_id,
                text_content: text_content.to_string(),
                longitude,
                latitude,
            })
            .await?;

        info!(person_id = %ctx.person_id, log_entry_id = %entry.id, "Log entry created");
        Ok(entry)
    }

    /// The entry with `id` if the caller owns it; `NotFound` otherwise.
    ///
    /// Someone else's entry is reported exactly like a missing one.
    pub async fn find_owned(&self, ctx: &RequestContext, id: LogEntryId) -> AppResult<LogEntry> {
        self.entries
            .find_by_id(id)
            .await?
            .filter(|entry| entry.is_owned_by(ctx.person_id))
            .ok_or_else(|| AppError::not_found(format!("Log entry {id} not found")))
    }
}
