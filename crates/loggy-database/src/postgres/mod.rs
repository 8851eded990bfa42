//! PostgreSQL store implementations.

pub mod attachment;
pub mod log_entry;
pub mod person;

pub use attachment::{PgAttachmentStore, PgAttachmentTransaction};
pub use log_entry::PgLogEntryStore;
pub use person::PgPersonStore;
