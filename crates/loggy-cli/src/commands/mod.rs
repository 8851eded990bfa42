//! CLI command definitions and dispatch.

pub mod account;
pub mod config;
pub mod log;
pub mod migrate;
pub mod serve;
pub mod session;
pub mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use loggy_client::{ApiClient, ClientError, FileTokenStore, TokenStore};
use loggy_core::config::AppConfig;
use loggy_core::error::AppError;

use crate::output::OutputFormat;

/// Loggy: a personal geotagged log
#[derive(Debug, Parser)]
#[command(name = "loggy", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay under `config/` (server-side commands)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Server base URL (client commands)
    #[arg(long, default_value = "http://localhost:8080")]
    pub server: String,

    /// File holding the current token (client commands)
    #[arg(long, default_value = ".loggy-token")]
    pub token_file: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Loggy server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Issue or verify tokens with the configured signing key
    Token(token::TokenArgs),
    /// Log in and store the token
    Login(account::CredentialArgs),
    /// Create an account and store the token
    CreateAccount(account::CredentialArgs),
    /// Forget the stored token
    Logout,
    /// Show the account behind the stored token
    Whoami,
    /// List your log entries, newest first
    Feed,
    /// Post a new log entry
    Post(log::PostArgs),
    /// Attach a photo to one of your entries
    Attach(log::AttachArgs),
    /// Token refresh for the stored session
    Session(session::SessionArgs),
}

/// Anything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Server-side or configuration failure.
    #[error(transparent)]
    App(#[from] AppError),
    /// Remote call or token file failure.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.command {
            Commands::Serve(_) | Commands::Session(_) => "info",
            _ => "warn",
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), CliError> {
        match &self.command {
            Commands::Serve(args) => Ok(serve::execute(args, &self.env).await?),
            Commands::Migrate(args) => Ok(migrate::execute(args, &self.env).await?),
            Commands::Config(args) => Ok(config::execute(args, &self.env, self.format).await?),
            Commands::Token(args) => Ok(token::execute(args, &self.env, self.format).await?),
            Commands::Login(args) => account::login(self.remote()?, args).await,
            Commands::CreateAccount(args) => account::create_account(self.remote()?, args).await,
            Commands::Logout => account::logout(self.remote()?).await,
            Commands::Whoami => account::whoami(self.remote()?, self.format).await,
            Commands::Feed => log::feed(self.remote()?, self.format).await,
            Commands::Post(args) => log::post(self.remote()?, args, self.format).await,
            Commands::Attach(args) => log::attach(self.remote()?, args, self.format).await,
            Commands::Session(args) => session::execute(self.remote()?, args).await,
        }
    }

    fn remote(&self) -> Result<Remote, CliError> {
        Ok(Remote {
            client: ApiClient::new(&self.server)?,
            tokens: FileTokenStore::new(&self.token_file),
        })
    }
}

/// A server connection plus the local token file.
#[derive(Debug, Clone)]
pub struct Remote {
    /// API client.
    pub client: ApiClient,
    /// Token file.
    pub tokens: FileTokenStore,
}

impl Remote {
    /// The stored token, or `NotLoggedIn`.
    pub async fn token(&self) -> Result<String, CliError> {
        self.tokens
            .load()
            .await?
            .ok_or_else(|| ClientError::NotLoggedIn.into())
    }
}

/// Helper: load configuration for `env`
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}
