//! Shared domain types.

pub mod id;

pub use id::{AttachmentId, LogEntryId, PersonId};
