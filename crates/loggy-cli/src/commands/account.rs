//! Account commands against a running server.

use clap::Args;

use loggy_client::TokenStore;

use super::{CliError, Remote};
use crate::output::{self, OutputFormat};

/// Email and password
#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Email address
    pub email: String,
    /// Password (12 to 64 characters)
    #[arg(long)]
    pub password: String,
}

/// Log in and store the token.
pub async fn login(remote: Remote, args: &CredentialArgs) -> Result<(), CliError> {
    let token = remote.client.login(&args.email, &args.password).await?;
    remote.tokens.save(&token).await?;
    output::print_success(&format!("Logged in as {}", args.email));
    Ok(())
}

/// Create an account and store the token.
pub async fn create_account(remote: Remote, args: &CredentialArgs) -> Result<(), CliError> {
    let token = remote
        .client
        .create_account(&args.email, &args.password)
        .await?;
    remote.tokens.save(&token).await?;
    output::print_success(&format!("Account created for {}", args.email));
    Ok(())
}

/// Forget the stored token.
pub async fn logout(remote: Remote) -> Result<(), CliError> {
    remote.tokens.clear().await?;
    output::print_success("Logged out");
    Ok(())
}

/// Show the account behind the stored token.
pub async fn whoami(remote: Remote, format: OutputFormat) -> Result<(), CliError> {
    let token = remote.token().await?;
    let me = remote.client.whoami(&token).await?;
    match format {
        OutputFormat::Table => {
            output::print_kv("ID", &me.id.to_string());
            output::print_kv("Email", &me.email);
        }
        OutputFormat::Json => output::print_item(&me, format),
    }
    Ok(())
}
