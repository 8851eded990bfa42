//! # loggy-client
//!
//! Typed client for the Loggy HTTP API plus the pieces a long-lived client
//! needs around it: somewhere to keep the current token, and a session
//! manager that refreshes that token periodically until shut down.

pub mod api;
pub mod error;
pub mod session;
pub mod token_store;

pub use api::{ApiClient, TokenRefresher, WhoAmI};
pub use error::ClientError;
pub use session::{RefreshOutcome, SessionManager};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
