//! Log entry entity model.

use chrono::{DateTime, Utc};
use loggy_core::types::{LogEntryId, PersonId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::attachment::ImageAttachment;

/// A single geotagged post in a person's log.
///
/// Entries are never updated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Serial identifier.
    pub id: LogEntryId,
    /// Owning person.
    #[serde(skip)]
    pub person_id: PersonId,
    /// Free-form text body.
    pub text_content: String,
    /// Server-assigned insert time.
    pub created_at: DateTime<Utc>,
    /// Client-supplied longitude in degrees.
    pub longitude: f64,
    /// Client-supplied latitude in degrees.
    pub latitude: f64,
    /// Attachments, populated by feed queries only.
    #[sqlx(skip)]
    #[serde(default)]
    pub image_attachments: Vec<ImageAttachment>,
}

impl LogEntry {
    /// Whether `person_id` owns this entry.
    pub fn is_owned_by(&self, person_id: PersonId) -> bool {
        self.person_id == person_id
    }
}

/// Data required to create a new log entry.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    /// Owning person.
    pub person_id: PersonId,
    /// Free-form text body.
    pub text_content: String,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}
