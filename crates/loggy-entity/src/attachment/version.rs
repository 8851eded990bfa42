//! Image version rows (table `image`).

use loggy_core::types::AttachmentId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata of one stored rendition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ImageVersion {
    /// Encoded MIME type, `image/webp` for everything the pipeline writes.
    pub mime_type: String,
    /// Pixel width; unique per attachment.
    pub width: i32,
    /// Pixel height.
    pub height: i32,
}

/// A rendition ready to be inserted.
#[derive(Clone)]
pub struct NewImage {
    /// Parent attachment.
    pub attachment_id: AttachmentId,
    /// Encoded MIME type.
    pub mime_type: String,
    /// Pixel width.
    pub width: i32,
    /// Pixel height.
    pub height: i32,
    /// Encoded bytes.
    pub data: Vec<u8>,
}

impl NewImage {
    /// Metadata view of this rendition.
    pub fn version(&self) -> ImageVersion {
        ImageVersion {
            mime_type: self.mime_type.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for NewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewImage")
            .field("attachment_id", &self.attachment_id)
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Bytes of one rendition as served to clients.
#[derive(Debug, Clone, FromRow)]
pub struct StoredImage {
    /// MIME type sent as `content-type`.
    pub mime_type: String,
    /// Encoded bytes.
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_wire_shape() {
        let version = ImageVersion {
            mime_type: "image/webp".to_string(),
            width: 320,
            height: 240,
        };
        let value = serde_json::to_value(&version).unwrap();
        assert_eq!(value["mimeType"], "image/webp");
        assert_eq!(value["width"], 320);
        assert_eq!(value["height"], 240);
    }

    #[test]
    fn test_new_image_debug_omits_bytes() {
        let image = NewImage {
            attachment_id: AttachmentId::new(),
            mime_type: "image/webp".to_string(),
            width: 10,
            height: 10,
            data: vec![7; 4096],
        };
        let debug = format!("{image:?}");
        assert!(debug.contains("data_len: 4096"));
    }
}
