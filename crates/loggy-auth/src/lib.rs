//! # loggy-auth
//!
//! Authentication primitives for Loggy.
//!
//! ## Modules
//!
//! - `token`: stateless HMAC-SHA256 bearer tokens (issue, verify, refresh)
//! - `password`: Argon2id password hashing and the length policy

pub mod password;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use token::{TokenRejection, TokenSigner};
