//! Route handlers organized by domain.

pub mod attachment;
pub mod auth;
pub mod browser_error;
pub mod health;
pub mod log;
pub mod shell;
