//! Lossy WebP codec.

use image::DynamicImage;
use image::imageops::FilterType;

use loggy_core::error::AppError;
use loggy_core::result::AppResult;

use crate::codec::{EncodedImage, ImageCodec};
use crate::ladder::scaled_height;

/// MIME type of everything this codec produces.
pub const WEBP_MIME: &str = "image/webp";

/// Largest width or height a WebP bitstream can carry.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Decodes JPEG/PNG uploads and encodes lossy WebP.
#[derive(Debug, Clone, Copy)]
pub struct WebpCodec {
    quality: f32,
}

impl WebpCodec {
    /// Create a codec with the given quality factor (0–100).
    pub fn new(quality: f32) -> Self {
        Self {
            quality: quality.clamp(0.0, 100.0),
        }
    }
}

impl Default for WebpCodec {
    fn default() -> Self {
        Self::new(80.0)
    }
}

impl ImageCodec for WebpCodec {
    fn decode(&self, data: &[u8]) -> AppResult<DynamicImage> {
        if data.is_empty() {
            return Err(AppError::codec("Empty image data"));
        }
        image::load_from_memory(data)
            .map_err(|e| AppError::codec(format!("Failed to decode image: {e}")))
    }

    fn encode(&self, image: &DynamicImage, width: Option<u32>) -> AppResult<EncodedImage> {
        let resized;
        let source = match width {
            Some(target) if target != image.width() => {
                let height = scaled_height(image.width(), image.height(), target);
                resized = image.resize_exact(target, height, FilterType::Lanczos3);
                &resized
            }
            _ => image,
        };

        if source.width() > WEBP_MAX_DIMENSION || source.height() > WEBP_MAX_DIMENSION {
            return Err(AppError::codec(format!(
                "{}x{} exceeds the WebP limit of {WEBP_MAX_DIMENSION}px",
                source.width(),
                source.height()
            )));
        }

        // The encoder only accepts 8-bit RGB or RGBA buffers.
        let pixels = if source.color().has_alpha() {
            DynamicImage::ImageRgba8(source.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(source.to_rgb8())
        };

        let encoder = ::webp::Encoder::from_image(&pixels)
            .map_err(|e| AppError::codec(format!("Unsupported pixel layout: {e}")))?;
        let data = encoder
            .encode_simple(false, self.quality)
            .map_err(|e| AppError::codec(format!("WebP encoding failed: {e:?}")))?
            .to_vec();

        tracing::debug!(
            width = pixels.width(),
            height = pixels.height(),
            bytes = data.len(),
            "Encoded WebP rendition"
        );

        Ok(EncodedImage {
            mime_type: WEBP_MIME.to_string(),
            width: pixels.width(),
            height: pixels.height(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_canonical_keeps_native_size() {
        let codec = WebpCodec::default();
        let image = codec.decode(&png(120, 80)).unwrap();
        let encoded = codec.encode(&image, None).unwrap();
        assert_eq!(encoded.mime_type, "image/webp");
        assert_eq!((encoded.width, encoded.height), (120, 80));
        assert_eq!(&encoded.data[..4], b"RIFF");
        assert_eq!(&encoded.data[8..12], b"WEBP");
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let codec = WebpCodec::default();
        let image = codec.decode(&png(400, 300)).unwrap();
        let encoded = codec.encode(&image, Some(320)).unwrap();
        assert_eq!((encoded.width, encoded.height), (320, 240));

        let round_trip = image::load_from_memory(&encoded.data).unwrap();
        assert_eq!(round_trip.width(), 320);
    }

    #[test]
    fn test_oversize_canonical_is_codec_error() {
        let codec = WebpCodec::default();
        let wide = DynamicImage::ImageRgb8(RgbImage::new(17_000, 4));

        let err = codec.encode(&wide, None).unwrap_err();
        assert_eq!(err.kind, loggy_core::error::ErrorKind::Codec);

        let tall = DynamicImage::ImageRgb8(RgbImage::new(2, WEBP_MAX_DIMENSION + 1));
        assert!(codec.encode(&tall, None).is_err());
    }

    #[test]
    fn test_oversize_source_can_still_be_downscaled() {
        let wide = DynamicImage::ImageRgb8(RgbImage::new(17_000, 4));
        let encoded = WebpCodec::default().encode(&wide, Some(320)).unwrap();
        assert_eq!(encoded.width, 320);
    }

    #[test]
    fn test_garbage_is_codec_error() {
        let err = WebpCodec::default().decode(b"definitely not an image").unwrap_err();
        assert_eq!(err.kind, loggy_core::error::ErrorKind::Codec);
        assert!(WebpCodec::default().decode(&[]).is_err());
    }
}
