//! # loggy-entity
//!
//! Domain entity models for Loggy. Every struct in this crate represents a
//! database table row or a domain value object. Row types additionally
//! derive `sqlx::FromRow`; wire-visible types serialize in camelCase.

pub mod attachment;
pub mod log_entry;
pub mod person;

pub use attachment::{ImageAttachment, ImageVersion, NewImage, StoredImage};
pub use log_entry::{LogEntry, NewLogEntry};
pub use person::{NewPerson, Person};
