//! Response compression layer.

use tower_http::CompressionLevel;
use tower_http::compression::CompressionLayer;

/// Gzip responses at the fast level.
///
/// The default predicate already skips `image/*` bodies, so stored WebP
/// versions go out untouched.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new()
        .gzip(true)
        .quality(CompressionLevel::Fastest)
}
