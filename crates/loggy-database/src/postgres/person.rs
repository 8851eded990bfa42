//! Person repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use loggy_core::error::{AppError, ErrorKind, codes};
use loggy_core::result::AppResult;
use loggy_core::types::PersonId;
use loggy_entity::{NewPerson, Person};

use crate::store::PersonStore;

/// PostgreSQL-backed [`PersonStore`].
#[derive(Debug, Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    /// Create a new person repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn find_by_id(&self, id: PersonId) -> AppResult<Option<Person>> {
        sqlx::query_as::<_, Person>("SELECT id, email, password FROM person WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find person by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Person>> {
        sqlx::query_as::<_, Person>("SELECT id, email, password FROM person WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find person by email", e)
            })
    }

    async fn create(&self, data: &NewPerson) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "INSERT INTO person (email, password) VALUES ($1, $2) \
             RETURNING id, email, password",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("person_email_key") =>
            {
                AppError::bad_request(format!("Email '{}' already registered", data.email))
                    .with_code(codes::EMAIL_TAKEN)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create person", e),
        })
    }
}
