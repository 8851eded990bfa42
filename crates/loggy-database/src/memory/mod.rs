//! Process-local store backend.
//!
//! All tables sit behind one [`tokio::sync::RwLock`]. Attachment
//! transactions stage their writes privately and apply them under a single
//! write lock on commit, so readers never observe a partial attachment.

mod store;
mod transaction;

pub use store::MemoryStore;
pub use transaction::MemoryAttachmentTransaction;
