//! Image ingestion configuration.

use serde::{Deserialize, Serialize};

/// Settings for the attachment ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Declared MIME types accepted for upload.
    #[serde(default = "default_accepted_mime_types")]
    pub accepted_mime_types: Vec<String>,
    /// Derivative widths in pixels, strictly ascending.
    #[serde(default = "default_ladder_widths")]
    pub ladder_widths: Vec<u32>,
    /// Lossy WebP quality factor (0–100).
    #[serde(default = "default_quality")]
    pub webp_quality: f32,
}

impl MediaConfig {
    /// Whether the declared MIME type is on the allowlist.
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.accepted_mime_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(mime_type))
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            accepted_mime_types: default_accepted_mime_types(),
            ladder_widths: default_ladder_widths(),
            webp_quality: default_quality(),
        }
    }
}

fn default_accepted_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/jpg".to_string(),
        "image/png".to_string(),
    ]
}

fn default_ladder_widths() -> Vec<u32> {
    vec![320, 600, 800]
}

fn default_quality() -> f32 {
    80.0
}
