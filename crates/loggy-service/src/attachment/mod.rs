//! Photo attachment ingestion and retrieval.

pub mod pipeline;
pub mod service;

pub use pipeline::{ImageUpload, IngestPipeline};
pub use service::AttachmentService;
