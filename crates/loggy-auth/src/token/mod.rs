//! Stateless bearer tokens.
//!
//! A token is `personId ":" issueTimeMillis ":" code`, where `code` is the
//! padded standard base64 of HMAC-SHA256 over the first two fields. Nothing
//! is stored server side; rotating the signing key invalidates every token.

pub mod signer;

pub use signer::{TokenRejection, TokenSigner};
