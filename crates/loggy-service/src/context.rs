//! Request context carrying the authenticated person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loggy_core::types::PersonId;

/// Context for the current authenticated request.
///
/// Produced from a verified token and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated person's ID.
    pub person_id: PersonId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(person_id: PersonId) -> Self {
        Self {
            person_id,
            request_time: Utc::now(),
        }
    }
}
