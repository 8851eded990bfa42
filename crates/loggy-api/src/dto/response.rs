//! Response DTOs.

use serde::{Deserialize, Serialize};

use loggy_entity::Person;

/// `{ "token": ... }` returned by login, account creation and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Freshly issued token.
    pub token: String,
}

/// Body of `GET /api/whoami`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// Person ID.
    pub id: i32,
    /// Email address.
    pub email: String,
}

impl From<Person> for WhoAmIResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.value(),
            email: person.email,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store is unreachable.
    pub status: String,
    /// Crate version.
    pub version: String,
}
