use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use loggy_core::error::{AppError, codes};
use loggy_core::result::AppResult;
use loggy_core::types::{AttachmentId, LogEntryId, PersonId};
use loggy_entity::{
    ImageAttachment, LogEntry, NewImage, NewLogEntry, NewPerson, Person, StoredImage,
};

use super::transaction::MemoryAttachmentTransaction;
use crate::feed::{FeedRow, fold_rows};
use crate::store::{AttachmentStore, AttachmentTransaction, LogEntryStore, PersonStore};

/// Row storage shared by the store and its transactions.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) persons: Vec<Person>,
    pub(crate) entries: Vec<LogEntry>,
    pub(crate) attachments: Vec<(AttachmentId, LogEntryId)>,
    pub(crate) images: Vec<NewImage>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    pub(crate) fn has_entry(&self, id: LogEntryId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub(crate) fn has_attachment(&self, id: AttachmentId) -> bool {
        self.attachments.iter().any(|(a, _)| *a == id)
    }

    pub(crate) fn has_image(&self, id: AttachmentId, width: i32) -> bool {
        self.images
            .iter()
            .any(|i| i.attachment_id == id && i.width == width)
    }

    /// Insert timestamps strictly increase even when the wall clock stalls.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

/// In-memory implementation of every store trait.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attachment rows, committed only.
    pub async fn attachment_count(&self) -> usize {
        self.tables.read().await.attachments.len()
    }

    /// Number of image version rows, committed only.
    pub async fn image_count(&self) -> usize {
        self.tables.read().await.images.len()
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>> {
        let tables = self.tables.read().await;
        Ok(tables.persons.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Person>> {
        let tables = self.tables.read().await;
        Ok(tables.persons.iter().find(|p| p.email == email).cloned())
    }

    async fn create(&self, data: &NewPerson) -> AppResult<Person> {
        let mut tables = self.tables.write().await;
        if tables.persons.iter().any(|p| p.email == data.email) {
            return Err(
                AppError::bad_request(format!("Email '{}' already registered", data.email))
                    .with_code(codes::EMAIL_TAKEN),
            );
        }

        let person = Person {
            id: PersonId(tables.persons.len() as i32 + 1),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
        };
        tables.persons.push(person.clone());
        Ok(person)
    }
}

#[async_trait]
impl LogEntryStore for MemoryStore {
    async fn find_by_id(&self, id: LogEntryId) -> AppResult<Option<LogEntry>> {
        let tables = self.tables.read().await;
        Ok(tables.entries.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, data: &NewLogEntry) -> AppResult<LogEntry> {
        let mut tables = self.tables.write().await;
        if !tables.persons.iter().any(|p| p.id == data.person_id) {
            return Err(AppError::database(format!(
                "log_entry.person_id references missing person {}",
                data.person_id
            )));
        }

        let entry = LogEntry {
            id: LogEntryId(tables.entries.len() as i32 + 1),
            person_id: data.person_id,
            text_content: data.text_content.clone(),
            created_at: tables.next_created_at(),
            longitude: data.longitude,
            latitude: data.latitude,
            image_attachments: Vec::new(),
        };
        tables.entries.push(entry.clone());
        Ok(entry)
    }

    async fn feed(&self, person_id: PersonId) -> AppResult<Vec<LogEntry>> {
        let tables = self.tables.read().await;

        let mut entries: Vec<&LogEntry> = tables
            .entries
            .iter()
            .filter(|e| e.person_id == person_id)
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let mut rows = Vec::new();
        for entry in entries {
            let base = FeedRow {
                id: entry.id,
                person_id: entry.person_id,
                text_content: entry.text_content.clone(),
                created_at: entry.created_at,
                longitude: entry.longitude,
                latitude: entry.latitude,
                attachment_id: None,
                image_mime_type: None,
                image_width: None,
                image_height: None,
            };

            let attachments: Vec<AttachmentId> = tables
                .attachments
                .iter()
                .filter(|(_, entry_id)| *entry_id == entry.id)
                .map(|(id, _)| *id)
                .collect();

            if attachments.is_empty() {
                rows.push(base);
                continue;
            }

            for attachment_id in attachments {
                let mut any = false;
                for image in tables
                    .images
                    .iter()
                    .filter(|i| i.attachment_id == attachment_id)
                {
                    any = true;
                    rows.push(FeedRow {
                        attachment_id: Some(attachment_id),
                        image_mime_type: Some(image.mime_type.clone()),
                        image_width: Some(image.width),
                        image_height: Some(image.height),
                        ..base.clone()
                    });
                }
                if !any {
                    rows.push(FeedRow {
                        attachment_id: Some(attachment_id),
                        ..base.clone()
                    });
                }
            }
        }

        Ok(fold_rows(rows))
    }
}

#[async_trait]
impl AttachmentStore for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn AttachmentTransaction>> {
        Ok(Box::new(MemoryAttachmentTransaction::new(Arc::clone(
            &self.tables,
        ))))
    }

    async fn find_image(&self, id: AttachmentId, width: i32) -> AppResult<Option<StoredImage>> {
        let tables = self.tables.read().await;
        Ok(tables
            .images
            .iter()
            .find(|i| i.attachment_id == id && i.width == width)
            .map(|i| StoredImage {
                mime_type: i.mime_type.clone(),
                data: i.data.clone(),
            }))
    }

    async fn find_attachment(&self, id: AttachmentId) -> AppResult<Option<ImageAttachment>> {
        let tables = self.tables.read().await;
        if !tables.has_attachment(id) {
            return Ok(None);
        }
        let versions = tables
            .images
            .iter()
            .filter(|i| i.attachment_id == id)
            .map(NewImage::version)
            .collect();
        Ok(Some(ImageAttachment { id, versions }))
    }
}
