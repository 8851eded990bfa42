//! Convenience result type alias for Loggy.

use crate::error::AppError;

/// A specialized `Result` type for Loggy operations.
pub type AppResult<T> = Result<T, AppError>;
