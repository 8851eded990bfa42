//! Store set that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use loggy_core::config::{DatabaseBackend, DatabaseConfig};
use loggy_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::postgres::{PgAttachmentStore, PgLogEntryStore, PgPersonStore};
use crate::store::{AttachmentStore, LogEntryStore, PersonStore};

/// The stores the application runs against.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct Database {
    persons: Arc<dyn PersonStore>,
    log_entries: Arc<dyn LogEntryStore>,
    attachments: Arc<dyn AttachmentStore>,
    pool: Option<DatabasePool>,
}

impl Database {
    /// Connect to the backend named in configuration.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                info!("Initializing in-memory store; data is lost on restart");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Stores backed by an existing PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            persons: Arc::new(PgPersonStore::new(pg.clone())),
            log_entries: Arc::new(PgLogEntryStore::new(pg.clone())),
            attachments: Arc::new(PgAttachmentStore::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores backed by a shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            persons: Arc::new(store.clone()),
            log_entries: Arc::new(store.clone()),
            attachments: Arc::new(store),
            pool: None,
        }
    }

    /// Assemble from arbitrary store implementations (for testing).
    pub fn from_stores(
        persons: Arc<dyn PersonStore>,
        log_entries: Arc<dyn LogEntryStore>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            persons,
            log_entries,
            attachments,
            pool: None,
        }
    }

    /// Person store.
    pub fn persons(&self) -> Arc<dyn PersonStore> {
        Arc::clone(&self.persons)
    }

    /// Log entry store.
    pub fn log_entries(&self) -> Arc<dyn LogEntryStore> {
        Arc::clone(&self.log_entries)
    }

    /// Attachment store.
    pub fn attachments(&self) -> Arc<dyn AttachmentStore> {
        Arc::clone(&self.attachments)
    }

    /// Name of the active backend, for logs and health output.
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Apply pending migrations. The memory backend has no schema.
    pub async fn migrate(&self) -> AppResult<()> {
        match &self.pool {
            Some(pool) => run_migrations(pool.pool()).await,
            None => Ok(()),
        }
    }

    /// Check backend connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_from_config() {
        let config = DatabaseConfig {
            backend: DatabaseBackend::Memory,
            ..DatabaseConfig::default()
        };
        let db = Database::connect(&config).await.unwrap();
        assert_eq!(db.backend_name(), "memory");
        assert!(db.health_check().await.unwrap());
        assert!(db.migrate().await.is_ok());
    }
}
