//! Log entry use cases.

pub mod service;

pub use service::LogService;
