//! Image attachment model.

use loggy_core::types::AttachmentId;
use serde::{Deserialize, Serialize};

use super::version::ImageVersion;

/// A photo attached to a log entry, with every stored rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Generated identifier.
    pub id: AttachmentId,
    /// Canonical version first, then the derivative ladder ascending.
    pub versions: Vec<ImageVersion>,
}

impl ImageAttachment {
    /// Widths of all stored versions in order.
    pub fn widths(&self) -> Vec<i32> {
        self.versions.iter().map(|v| v.width).collect()
    }

    /// The version with exactly `width`, if one was produced.
    pub fn version(&self, width: i32) -> Option<&ImageVersion> {
        self.versions.iter().find(|v| v.width == width)
    }
}
