//! # loggy-database
//!
//! Store access layer for Loggy: the store traits the services depend on,
//! a PostgreSQL implementation on top of sqlx, and a process-local
//! implementation used for development and tests. [`Database`] picks one
//! according to configuration.

pub mod connection;
pub mod feed;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod provider;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Database;
pub use store::{AttachmentStore, AttachmentTransaction, LogEntryStore, PersonStore};
