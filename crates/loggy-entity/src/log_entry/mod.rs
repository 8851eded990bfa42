//! Log entry entities.

pub mod model;

pub use model::{LogEntry, NewLogEntry};
