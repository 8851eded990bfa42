//! # loggy-service
//!
//! Business logic service layer for Loggy. Each service orchestrates the
//! store traits, the token signer, and the image codec to implement one
//! group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod attachment;
pub mod context;
pub mod log;

pub use account::AccountService;
pub use attachment::{AttachmentService, ImageUpload, IngestPipeline};
pub use context::RequestContext;
pub use log::LogService;
