//! Folding of flat feed rows into nested log entries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use loggy_core::types::{AttachmentId, LogEntryId, PersonId};
use loggy_entity::{ImageAttachment, ImageVersion, LogEntry};

/// One row of `log_entry LEFT JOIN image_attachment LEFT JOIN image`.
#[derive(Debug, Clone, FromRow)]
pub struct FeedRow {
    pub id: LogEntryId,
    pub person_id: PersonId,
    pub text_content: String,
    pub created_at: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub attachment_id: Option<AttachmentId>,
    pub image_mime_type: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
}

/// Fold joined rows into entries, keeping the order in which entries,
/// attachments, and versions first appear.
pub fn fold_rows(rows: impl IntoIterator<Item = FeedRow>) -> Vec<LogEntry> {
    let mut entries: Vec<LogEntry> = Vec::new();
    let mut entry_index: HashMap<LogEntryId, usize> = HashMap::new();
    let mut attachment_index: HashMap<AttachmentId, (usize, usize)> = HashMap::new();

    for row in rows {
        let e = *entry_index.entry(row.id).or_insert_with(|| {
            entries.push(LogEntry {
                id: row.id,
                person_id: row.person_id,
                text_content: row.text_content.clone(),
                created_at: row.created_at,
                longitude: row.longitude,
                latitude: row.latitude,
                image_attachments: Vec::new(),
            });
            entries.len() - 1
        });

        let Some(attachment_id) = row.attachment_id else {
            continue;
        };

        let (e, a) = *attachment_index.entry(attachment_id).or_insert_with(|| {
            let attachments = &mut entries[e].image_attachments;
            attachments.push(ImageAttachment {
                id: attachment_id,
                versions: Vec::new(),
            });
            (e, attachments.len() - 1)
        });

        if let (Some(mime_type), Some(width), Some(height)) =
            (row.image_mime_type, row.image_width, row.image_height)
        {
            entries[e].image_attachments[a].versions.push(ImageVersion {
                mime_type,
                width,
                height,
            });
        }
    }

    entries
}
