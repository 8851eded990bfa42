//! Codec abstraction and blocking-pool hand-off.

use std::fmt::Debug;

use image::DynamicImage;

use loggy_core::error::{AppError, ErrorKind};
use loggy_core::result::AppResult;

/// One encoded rendition.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// MIME type of `data`.
    pub mime_type: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Encoded bytes.
    pub data: Vec<u8>,
}

impl Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Decodes uploads and produces encoded renditions.
///
/// Implementations are CPU-bound and must be called from the blocking
/// thread pool (see [`run_blocking`]).
pub trait ImageCodec: Send + Sync + Debug + 'static {
    /// Decode an uploaded payload.
    fn decode(&self, data: &[u8]) -> AppResult<DynamicImage>;

    /// Encode `image` at its native size, or resized to `width` keeping
    /// the aspect ratio.
    fn encode(&self, image: &DynamicImage, width: Option<u32>) -> AppResult<EncodedImage>;
}

/// Run CPU-bound work on the blocking thread pool.
pub async fn run_blocking<T, F>(task: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Image codec task panicked", e))?
}
