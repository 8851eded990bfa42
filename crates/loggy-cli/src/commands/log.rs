//! Log entry commands against a running server.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use loggy_core::types::LogEntryId;
use loggy_entity::LogEntry;

use super::{CliError, Remote};
use crate::output::{self, OutputFormat};

/// Arguments for the post command
#[derive(Debug, Args)]
pub struct PostArgs {
    /// Entry text
    pub text: String,
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: f64,
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: f64,
}

/// Arguments for the attach command
#[derive(Debug, Args)]
pub struct AttachArgs {
    /// Entry to attach to
    pub entry_id: i32,
    /// JPEG or PNG file
    pub file: PathBuf,
}

/// Log entry display row for table output
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    /// Entry ID
    id: i32,
    /// Created at
    created_at: String,
    /// Text
    text: String,
    /// Position
    position: String,
    /// Photos
    photos: usize,
}

impl From<&LogEntry> for EntryRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            id: entry.id.value(),
            created_at: entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            text: entry.text_content.clone(),
            position: format!("{:.5}, {:.5}", entry.latitude, entry.longitude),
            photos: entry.image_attachments.len(),
        }
    }
}

/// Version display row for table output
#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    /// Width
    width: i32,
    /// Height
    height: i32,
    /// MIME type
    mime_type: String,
    /// Retrieval path
    path: String,
}

/// List the caller's entries.
pub async fn feed(remote: Remote, format: OutputFormat) -> Result<(), CliError> {
    let token = remote.token().await?;
    let entries = remote.client.feed(&token).await?;
    match format {
        OutputFormat::Table => {
            let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_item(&entries, format),
    }
    Ok(())
}

/// Post a new entry.
pub async fn post(remote: Remote, args: &PostArgs, format: OutputFormat) -> Result<(), CliError> {
    let token = remote.token().await?;
    let entry = remote
        .client
        .post_entry(&token, &args.text, args.longitude, args.latitude)
        .await?;
    match format {
        OutputFormat::Table => output::print_success(&format!("Posted entry {}", entry.id)),
        OutputFormat::Json => output::print_item(&entry, format),
    }
    Ok(())
}

/// Upload a photo to an entry.
pub async fn attach(
    remote: Remote,
    args: &AttachArgs,
    format: OutputFormat,
) -> Result<(), CliError> {
    let token = remote.token().await?;
    let data = tokio::fs::read(&args.file)
        .await
        .map_err(loggy_client::ClientError::from)?;

    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime = mime_guess::from_path(&args.file)
        .first_or_octet_stream()
        .to_string();

    let attachment = remote
        .client
        .attach(&token, LogEntryId(args.entry_id), &file_name, &mime, data)
        .await?;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Attachment {} stored", attachment.id));
            let rows: Vec<VersionRow> = attachment
                .versions
                .iter()
                .map(|v| VersionRow {
                    width: v.width,
                    height: v.height,
                    mime_type: v.mime_type.clone(),
                    path: format!("/api/attachment/{}/{}", attachment.id, v.width),
                })
                .collect();
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_item(&attachment, format),
    }
    Ok(())
}
