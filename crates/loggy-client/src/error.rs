//! Client error type.

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::ApiClient) and the session manager.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {error}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the status reason.
        error: String,
    },
    /// The request never produced a response, or the body was unreadable.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Local token file could not be read or written.
    #[error("token store error: {0}")]
    Io(#[from] std::io::Error),
    /// A command needs a token and none is stored.
    #[error("not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// Whether the server rejected the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}
