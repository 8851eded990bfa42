//! Offline token tools using the configured signing key.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;

use loggy_auth::TokenSigner;
use loggy_core::error::AppError;
use loggy_core::traits::SystemClock;
use loggy_core::types::PersonId;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a token for a person
    Issue {
        /// Person ID
        person_id: i32,
        /// Issue time in epoch milliseconds (default: now)
        #[arg(long)]
        at: Option<i64>,
    },
    /// Check a token and print who it belongs to
    Verify {
        /// The token to check
        token: String,
    },
}

#[derive(Debug, Serialize)]
struct Verified {
    valid: bool,
    person_id: Option<i32>,
    reason: Option<String>,
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let signer = TokenSigner::new(&config.auth, Arc::new(SystemClock))?;

    match &args.command {
        TokenCommand::Issue { person_id, at } => {
            let person_id = PersonId(*person_id);
            let token = match at {
                Some(at) => signer.issue_at(person_id, *at),
                None => signer.issue(person_id),
            };
            println!("{token}");
        }
        TokenCommand::Verify { token } => {
            let verified = match signer.verify(token) {
                Ok(person_id) => Verified {
                    valid: true,
                    person_id: Some(person_id.value()),
                    reason: None,
                },
                Err(rejection) => Verified {
                    valid: false,
                    person_id: None,
                    reason: Some(rejection.to_string()),
                },
            };
            output::print_item(&verified, format);
            if !verified.valid {
                return Err(AppError::unauthorized("Token rejected"));
            }
        }
    }

    Ok(())
}
