//! # loggy-media
//!
//! Image processing for photo attachments: decoding uploads, re-encoding
//! to lossy WebP, and computing the downscaled ladder.

pub mod codec;
pub mod ladder;
pub mod webp_codec;

pub use codec::{EncodedImage, ImageCodec, run_blocking};
pub use ladder::{plan_ladder, scaled_height};
pub use webp_codec::{WEBP_MIME, WebpCodec};
