//! Database migration management commands.

use clap::{Args, Subcommand};

use loggy_core::config::DatabaseBackend;
use loggy_core::error::AppError;
use loggy_database::Database;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;

    match &args.command {
        MigrateCommand::Run => {
            if config.database.backend == DatabaseBackend::Memory {
                output::print_warning("The in-memory backend has no schema; nothing to migrate.");
                return Ok(());
            }

            let database = Database::connect(&config.database).await?;
            println!("Running database migrations...");
            database.migrate().await?;
            database.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
