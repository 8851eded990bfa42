//! Start the Loggy server.

use clap::Args;

use loggy_core::config::DatabaseBackend;
use loggy_core::error::AppError;
use loggy_database::connection::mask_password;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store regardless of configuration
    #[arg(long)]
    pub memory: bool,

    /// Skip migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.backend = DatabaseBackend::Memory;
    }
    if args.no_migrate {
        config.database.auto_migrate = false;
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.database.backend,
        database = %mask_password(&config.database.url),
        "Serving"
    );

    loggy_api::run_server(config, loggy_api::shutdown_signal()).await
}
