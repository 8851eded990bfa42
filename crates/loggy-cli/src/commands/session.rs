//! Keep the stored token fresh.

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};

use loggy_client::{RefreshOutcome, SessionManager};
use loggy_core::traits::SystemClock;

use super::{CliError, Remote};
use crate::output;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Refresh the stored token once
    Refresh,
    /// Refresh the stored token periodically until Ctrl+C
    KeepAlive {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 900)]
        interval_seconds: u64,
    },
}

/// Execute session commands
pub async fn execute(remote: Remote, args: &SessionArgs) -> Result<(), CliError> {
    let period = match &args.command {
        SessionCommand::Refresh => SessionManager::DEFAULT_PERIOD,
        SessionCommand::KeepAlive { interval_seconds } => {
            Duration::from_secs((*interval_seconds).max(1))
        }
    };
    let manager = SessionManager::new(
        Arc::new(remote.client),
        Arc::new(remote.tokens),
        Arc::new(SystemClock),
        period,
    );

    match &args.command {
        SessionCommand::Refresh => report(manager.refresh_now().await?),
        SessionCommand::KeepAlive { .. } => {
            manager.start().await;
            output::print_success(&format!(
                "Refreshing every {}s; press Ctrl+C to stop",
                period.as_secs()
            ));
            loggy_api::shutdown_signal().await;
            manager.shutdown().await;
            output::print_success("Stopped");
        }
    }
    Ok(())
}

fn report(outcome: RefreshOutcome) {
    match outcome {
        RefreshOutcome::Refreshed => output::print_success("Token refreshed"),
        RefreshOutcome::NoToken => output::print_warning("Not logged in; nothing to refresh"),
        RefreshOutcome::Rejected => output::print_warning("Token rejected; you have been logged out"),
    }
}
