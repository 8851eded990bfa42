//! Person entity model.

use loggy_core::types::PersonId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    /// Serial identifier.
    pub id: PersonId,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash in PHC string format.
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Data required to create a new person.
#[derive(Debug, Clone)]
pub struct NewPerson {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
