//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for the token MAC (HMAC-SHA256). Required.
    pub signing_key: String,
    /// Token time-to-live in milliseconds, measured from issue time.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_ms: i64,
    /// How often clients should refresh their token, in seconds.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
}

impl AuthConfig {
    /// Build a configuration with the given key and default timings.
    pub fn with_key(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            token_ttl_ms: default_token_ttl(),
            refresh_interval_seconds: default_refresh_interval(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"****")
            .field("token_ttl_ms", &self.token_ttl_ms)
            .field("refresh_interval_seconds", &self.refresh_interval_seconds)
            .finish()
    }
}

fn default_token_ttl() -> i64 {
    1000 * 60 * 60 * 24 * 7
}

fn default_refresh_interval() -> u64 {
    15 * 60
}
