//! Shared application state passed to all handlers via Axum's `State` extractor.

use std::sync::Arc;

use loggy_auth::password::{PasswordHasher, PasswordValidator};
use loggy_auth::token::TokenSigner;
use loggy_core::config::AppConfig;
use loggy_core::result::AppResult;
use loggy_core::traits::Clock;
use loggy_database::provider::Database;
use loggy_media::WebpCodec;
use loggy_service::{AccountService, AttachmentService, IngestPipeline, LogService};

/// Shared application state.
///
/// Cloned into every handler. All fields are `Arc`-wrapped or cheaply
/// cloneable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The active store backend.
    pub database: Database,
    /// Token signer.
    pub signer: Arc<TokenSigner>,
    /// Accounts and identity.
    pub account_service: Arc<AccountService>,
    /// Log entries and the feed.
    pub log_service: Arc<LogService>,
    /// Photo attachments.
    pub attachment_service: Arc<AttachmentService>,
}

impl AppState {
    /// Wire services on top of an opened database.
    pub fn build(config: AppConfig, database: Database, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let signer = Arc::new(TokenSigner::new(&config.auth, clock)?);

        let account_service = Arc::new(AccountService::new(
            database.persons(),
            Arc::clone(&signer),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new()),
        ));

        let log_service = Arc::new(LogService::new(database.log_entries()));

        let pipeline = Arc::new(IngestPipeline::new(
            database.attachments(),
            Arc::new(WebpCodec::new(config.media.webp_quality)),
            config.media.clone(),
        ));
        let attachment_service = Arc::new(AttachmentService::new(
            Arc::clone(&log_service),
            pipeline,
            database.attachments(),
        ));

        Ok(Self {
            config: Arc::new(config),
            database,
            signer,
            account_service,
            log_service,
            attachment_service,
        })
    }
}
