//! Store traits the service layer depends on.
//!
//! Every backend implements all three traits. Errors are reported as
//! [`AppError`](loggy_core::AppError) with `ErrorKind::Database` unless a
//! more specific client-facing kind applies (duplicate email).

use std::fmt::Debug;

use async_trait::async_trait;

use loggy_core::result::AppResult;
use loggy_core::types::{AttachmentId, LogEntryId, PersonId};
use loggy_entity::{ImageAttachment, LogEntry, NewImage, NewLogEntry, NewPerson, Person, StoredImage};

/// Person (account) persistence.
#[async_trait]
pub trait PersonStore: Send + Sync + Debug {
    /// Find a person by primary key.
    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>>;

    /// Find a person by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Person>>;

    /// Insert a person. A duplicate email fails with `BadRequest` carrying
    /// the `email-taken` code.
    async fn create(&self, data: &NewPerson) -> AppResult<Person>;
}

/// Log entry persistence and the feed query.
#[async_trait]
pub trait LogEntryStore: Send + Sync + Debug {
    /// Find an entry by primary key, without attachments.
    async fn find_by_id(&self, id: LogEntryId) -> AppResult<Option<LogEntry>>;

    /// Insert an entry; the store assigns `id` and `created_at`.
    async fn create(&self, data: &NewLogEntry) -> AppResult<LogEntry>;

    /// All entries of a person, newest first, with attachments and
    /// version metadata folded in.
    async fn feed(&self, person_id: PersonId) -> AppResult<Vec<LogEntry>>;
}

/// Attachment persistence.
#[async_trait]
pub trait AttachmentStore: Send + Sync + Debug {
    /// Open a transaction scope for attachment writes.
    async fn begin(&self) -> AppResult<Box<dyn AttachmentTransaction>>;

    /// Bytes of the version with exactly `width`.
    async fn find_image(&self, id: AttachmentId, width: i32) -> AppResult<Option<StoredImage>>;

    /// An attachment with its version metadata in insertion order.
    async fn find_attachment(&self, id: AttachmentId) -> AppResult<Option<ImageAttachment>>;
}

/// A unit of attachment writes that commits or discards as a whole.
///
/// Dropping a transaction without calling [`commit`](Self::commit)
/// discards every write made through it.
#[async_trait]
pub trait AttachmentTransaction: Send {
    /// Insert the parent attachment row and return its generated id.
    async fn create_attachment(&mut self, log_entry_id: LogEntryId) -> AppResult<AttachmentId>;

    /// Insert one image version row.
    async fn create_image(&mut self, image: &NewImage) -> AppResult<()>;

    /// Make every write visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard every write.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}
