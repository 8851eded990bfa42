//! Token issue, verification, and refresh.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use loggy_core::config::AuthConfig;
use loggy_core::error::AppError;
use loggy_core::traits::Clock;
use loggy_core::types::PersonId;

type HmacSha256 = Hmac<Sha256>;

/// Why a token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// Wrong number of fields, an empty field, or a non-numeric id or time.
    #[error("malformed token")]
    Malformed,
    /// Older than the configured TTL.
    #[error("token expired")]
    Expired,
    /// The code does not match the recomputed MAC.
    #[error("token signature mismatch")]
    BadSignature,
}

/// Issues and verifies tokens with one signing key.
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_ms", &self.ttl_ms)
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let mac = HmacSha256::new_from_slice(config.signing_key.as_bytes())
            .map_err(|e| AppError::configuration(format!("Invalid signing key: {e}")))?;

        Ok(Self {
            mac,
            ttl_ms: config.token_ttl_ms,
            clock,
        })
    }

    /// Token lifetime in milliseconds.
    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Issues a token for `person_id` stamped with the current time.
    pub fn issue(&self, person_id: PersonId) -> String {
        self.issue_at(person_id, self.clock.now_millis())
    }

    /// Issues a token stamped with `issued_at` milliseconds.
    pub fn issue_at(&self, person_id: PersonId, issued_at: i64) -> String {
        let payload = format!("{person_id}:{issued_at}");
        let code = STANDARD.encode(self.sign(&payload));
        format!("{payload}:{code}")
    }

    /// Verifies a token against the current time.
    pub fn verify(&self, token: &str) -> Result<PersonId, TokenRejection> {
        self.verify_at(token, self.clock.now_millis())
    }

    /// Verifies a token as if the time were `now` milliseconds.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<PersonId, TokenRejection> {
        let mut fields = token.split(':');
        let (Some(id), Some(issued_at), Some(code), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(TokenRejection::Malformed);
        };
        if id.is_empty() || issued_at.is_empty() || code.is_empty() {
            return Err(TokenRejection::Malformed);
        }

        let person_id: PersonId = id.parse().map_err(|_| TokenRejection::Malformed)?;
        let issued_at_ms: i64 = issued_at.parse().map_err(|_| TokenRejection::Malformed)?;

        if now.saturating_sub(issued_at_ms) > self.ttl_ms {
            return Err(TokenRejection::Expired);
        }

        let supplied = STANDARD
            .decode(code)
            .map_err(|_| TokenRejection::BadSignature)?;

        let mut mac = self.mac.clone();
        mac.update(format!("{id}:{issued_at}").as_bytes());
        mac.verify_slice(&supplied)
            .map_err(|_| TokenRejection::BadSignature)?;

        Ok(person_id)
    }

    /// Verifies a token and issues a fresh one for the same person.
    pub fn refresh(&self, token: &str) -> Result<String, TokenRejection> {
        let person_id = self.verify(token)?;
        Ok(self.issue(person_id))
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}
