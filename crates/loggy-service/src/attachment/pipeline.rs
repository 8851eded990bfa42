//! Attachment ingestion pipeline.
//!
//! An upload becomes one attachment row, one canonical WebP version at the
//! native size, and one version per ladder width narrower than the
//! canonical one. All rows are written through a single
//! [`AttachmentTransaction`]; nothing is visible unless every step succeeds.

use std::sync::Arc;

use bytes::Bytes;
use image::DynamicImage;
use tracing::{debug, info, warn};

use loggy_core::config::MediaConfig;
use loggy_core::error::{AppError, ErrorKind};
use loggy_core::result::AppResult;
use loggy_core::types::{AttachmentId, LogEntryId};
use loggy_database::store::{AttachmentStore, AttachmentTransaction};
use loggy_entity::{ImageAttachment, NewImage};
use loggy_media::{EncodedImage, ImageCodec, plan_ladder, run_blocking};

/// An uploaded photo as received from the client.
#[derive(Clone)]
pub struct ImageUpload {
    /// Declared MIME type of the payload.
    pub content_type: String,
    /// Raw payload.
    pub data: Bytes,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("content_type", &self.content_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Turns uploads into stored image versions.
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    attachments: Arc<dyn AttachmentStore>,
    codec: Arc<dyn ImageCodec>,
    config: MediaConfig,
}

impl IngestPipeline {
    /// Creates a new pipeline.
    pub fn new(
        attachments: Arc<dyn AttachmentStore>,
        codec: Arc<dyn ImageCodec>,
        config: MediaConfig,
    ) -> Self {
        Self {
            attachments,
            codec,
            config,
        }
    }

    /// Ingest `upload` as a new attachment of `log_entry_id`.
    ///
    /// With `tx: None` the pipeline opens its own transaction and commits it.
    /// With `Some(tx)` every write goes through the caller's transaction and
    /// nothing is committed here; the caller decides.
    pub async fn ingest(
        &self,
        upload: &ImageUpload,
        log_entry_id: LogEntryId,
        tx: Option<&mut dyn AttachmentTransaction>,
    ) -> AppResult<ImageAttachment> {
        if !self.config.accepts(&upload.content_type) {
            return Err(AppError::bad_request(format!(
                "Unsupported image type '{}'",
                upload.content_type
            )));
        }

        if let Some(tx) = tx {
            return self.write(tx, upload, log_entry_id).await;
        }

        let mut tx = self.attachments.begin().await?;
        match self.write(&mut *tx, upload, log_entry_id).await {
            Ok(attachment) => {
                tx.commit().await?;
                info!(
                    attachment_id = %attachment.id,
                    log_entry_id = %log_entry_id,
                    versions = attachment.versions.len(),
                    "Attachment stored"
                );
                Ok(attachment)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback after failed ingestion also failed");
                }
                Err(e)
            }
        }
    }

    async fn write(
        &self,
        tx: &mut dyn AttachmentTransaction,
        upload: &ImageUpload,
        log_entry_id: LogEntryId,
    ) -> AppResult<ImageAttachment> {
        let attachment_id = tx.create_attachment(log_entry_id).await?;

        let codec = Arc::clone(&self.codec);
        let data = upload.data.clone();
        let (source, canonical) = run_blocking(move || {
            let source = codec.decode(&data).map_err(|e| match e.kind {
                ErrorKind::Codec => AppError::bad_request(format!("Unreadable image: {}", e.message)),
                _ => e,
            })?;
            let canonical = codec.encode(&source, None)?;
            Ok((Arc::new(source), canonical))
        })
        .await?;

        let mut versions = Vec::new();
        let canonical_width = canonical.width;
        versions.push(store_version(tx, attachment_id, canonical).await?);

        for width in plan_ladder(canonical_width, &self.config.ladder_widths) {
            let rendition = self.encode_width(Arc::clone(&source), width).await?;
            versions.push(store_version(tx, attachment_id, rendition).await?);
        }

        Ok(ImageAttachment {
            id: attachment_id,
            versions,
        })
    }

    async fn encode_width(&self, source: Arc<DynamicImage>, width: u32) -> AppResult<EncodedImage> {
        let codec = Arc::clone(&self.codec);
        run_blocking(move || codec.encode(&source, Some(width))).await
    }
}

async fn store_version(
    tx: &mut dyn AttachmentTransaction,
    attachment_id: AttachmentId,
    rendition: EncodedImage,
) -> AppResult<loggy_entity::ImageVersion> {
    let image = NewImage {
        attachment_id,
        mime_type: rendition.mime_type,
        width: to_i32(rendition.width)?,
        height: to_i32(rendition.height)?,
        data: rendition.data,
    };
    tx.create_image(&image).await?;
    debug!(
        attachment_id = %attachment_id,
        width = image.width,
        height = image.height,
        bytes = image.data.len(),
        "Image version written"
    );
    Ok(image.version())
}

fn to_i32(pixels: u32) -> AppResult<i32> {
    i32::try_from(pixels).map_err(|_| AppError::codec(format!("Dimension {pixels} out of range")))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use image::{ImageFormat, Rgb, RgbImage};
    use loggy_database::memory::MemoryStore;
    use loggy_database::store::{LogEntryStore, PersonStore};
    use loggy_entity::{NewLogEntry, NewPerson, StoredImage};
    use loggy_media::WebpCodec;

    use super::*;

    /// Delegates to the real codec but fails the n-th `encode` call.
    #[derive(Debug)]
    struct FailingCodec {
        inner: WebpCodec,
        fail_on: usize,
        calls: AtomicUsize,
    }

    impl ImageCodec for FailingCodec {
        fn decode(&self, data: &[u8]) -> AppResult<DynamicImage> {
            self.inner.decode(data)
        }

        fn encode(&self, image: &DynamicImage, width: Option<u32>) -> AppResult<EncodedImage> {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
                return Err(AppError::codec("injected encoder failure"));
            }
            self.inner.encode(image, width)
        }
    }

    /// Memory store whose transactions fail the n-th `create_image` call.
    #[derive(Debug)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_on: usize,
    }

    struct FlakyTransaction {
        inner: Box<dyn AttachmentTransaction>,
        fail_on: usize,
        calls: usize,
    }

    #[async_trait]
    impl AttachmentStore for FlakyStore {
        async fn begin(&self) -> AppResult<Box<dyn AttachmentTransaction>> {
            Ok(Box::new(FlakyTransaction {
                inner: self.inner.begin().await?,
                fail_on: self.fail_on,
                calls: 0,
            }))
        }

        async fn find_image(&self, id: AttachmentId, width: i32) -> AppResult<Option<StoredImage>> {
            self.inner.find_image(id, width).await
        }

        async fn find_attachment(&self, id: AttachmentId) -> AppResult<Option<ImageAttachment>> {
            self.inner.find_attachment(id).await
        }
    }

    #[async_trait]
    impl AttachmentTransaction for FlakyTransaction {
        async fn create_attachment(&mut self, log_entry_id: LogEntryId) -> AppResult<AttachmentId> {
            self.inner.create_attachment(log_entry_id).await
        }

        async fn create_image(&mut self, image: &NewImage) -> AppResult<()> {
            self.calls += 1;
            if self.calls == self.fail_on {
                return Err(AppError::database("connection reset during image insert"));
            }
            self.inner.create_image(image).await
        }

        async fn commit(self: Box<Self>) -> AppResult<()> {
            self.inner.commit().await
        }

        async fn rollback(self: Box<Self>) -> AppResult<()> {
            self.inner.rollback().await
        }
    }

    fn png(width: u32, height: u32) -> ImageUpload {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        ImageUpload {
            content_type: "image/png".to_string(),
            data: Bytes::from(buf),
        }
    }

    async fn setup(codec: Arc<dyn ImageCodec>) -> (MemoryStore, IngestPipeline, LogEntryId) {
        let store = MemoryStore::new();
        let person = PersonStore::create(
            &store,
            &NewPerson {
                email: "a@example.com".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
        let entry = LogEntryStore::create(
            &store,
            &NewLogEntry {
                person_id: person.id,
                text_content: "with photo".to_string(),
                longitude: 0.0,
                latitude: 0.0,
            },
        )
        .await
        .unwrap();
        let pipeline = IngestPipeline::new(Arc::new(store.clone()), codec, MediaConfig::default());
        (store, pipeline, entry.id)
    }

    #[tokio::test]
    async fn test_wide_image_gets_full_ladder() {
        let (store, pipeline, entry) = setup(Arc::new(WebpCodec::default())).await;
        let attachment = pipeline.ingest(&png(1000, 500), entry, None).await.unwrap();

        assert_eq!(attachment.widths(), vec![1000, 320, 600, 800]);
        assert_eq!(attachment.versions[0].height, 500);
        assert_eq!(attachment.versions[1].height, 160);
        assert!(attachment.versions.iter().all(|v| v.mime_type == "image/webp"));

        let stored = store.find_attachment(attachment.id).await.unwrap().unwrap();
        assert_eq!(stored, attachment);
    }

    #[tokio::test]
    async fn test_narrow_image_gets_partial_ladder() {
        let (_, pipeline, entry) = setup(Arc::new(WebpCodec::default())).await;
        let attachment = pipeline.ingest(&png(400, 300), entry, None).await.unwrap();
        assert_eq!(attachment.widths(), vec![400, 320]);
        assert_eq!(attachment.versions[1].height, 240);
    }

    #[tokio::test]
    async fn test_unsupported_type_writes_nothing() {
        let (store, pipeline, entry) = setup(Arc::new(WebpCodec::default())).await;
        let mut upload = png(100, 100);
        upload.content_type = "image/gif".to_string();

        let err = pipeline.ingest(&upload, entry, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(store.attachment_count().await, 0);
    }

    #[tokio::test]
    async fn test_failure_after_canonical_rolls_back_everything() {
        let codec = FailingCodec {
            inner: WebpCodec::default(),
            fail_on: 3,
            calls: AtomicUsize::new(0),
        };
        let (store, pipeline, entry) = setup(Arc::new(codec)).await;

        let err = pipeline.ingest(&png(1000, 500), entry, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Codec);
        assert_eq!(store.attachment_count().await, 0);
        assert_eq!(store.image_count().await, 0);
    }

    #[tokio::test]
    async fn test_database_failure_mid_ladder_rolls_back_everything() {
        let (store, _, entry) = setup(Arc::new(WebpCodec::default())).await;
        let flaky = FlakyStore {
            inner: store.clone(),
            fail_on: 3,
        };
        let pipeline = IngestPipeline::new(
            Arc::new(flaky),
            Arc::new(WebpCodec::default()),
            MediaConfig::default(),
        );

        let err = pipeline.ingest(&png(1000, 500), entry, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(store.attachment_count().await, 0);
        assert_eq!(store.image_count().await, 0);
    }

    #[tokio::test]
    async fn test_database_failure_on_canonical_rolls_back_attachment_row() {
        let (store, _, entry) = setup(Arc::new(WebpCodec::default())).await;
        let flaky = FlakyStore {
            inner: store.clone(),
            fail_on: 1,
        };
        let pipeline = IngestPipeline::new(
            Arc::new(flaky),
            Arc::new(WebpCodec::default()),
            MediaConfig::default(),
        );

        let err = pipeline.ingest(&png(400, 300), entry, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(store.attachment_count().await, 0);
        assert_eq!(store.image_count().await, 0);
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_bad_request() {
        let (store, pipeline, entry) = setup(Arc::new(WebpCodec::default())).await;
        let upload = ImageUpload {
            content_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"not really a jpeg"),
        };
        let err = pipeline.ingest(&upload, entry, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(store.attachment_count().await, 0);
    }

    #[tokio::test]
    async fn test_outer_transaction_controls_visibility() {
        let (store, pipeline, entry) = setup(Arc::new(WebpCodec::default())).await;

        let mut outer = store.begin().await.unwrap();
        let attachment = pipeline
            .ingest(&png(400, 300), entry, Some(&mut *outer))
            .await
            .unwrap();
        assert_eq!(store.attachment_count().await, 0);
        assert_eq!(store.image_count().await, 0);

        outer.commit().await.unwrap();
        assert_eq!(store.attachment_count().await, 1);
        assert_eq!(store.image_count().await, 2);
        assert!(store.find_attachment(attachment.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_outer_rollback_discards_pipeline_writes() {
        let (store, pipeline, entry) = setup(Arc::new(WebpCodec::default())).await;

        let mut outer = store.begin().await.unwrap();
        pipeline
            .ingest(&png(1000, 500), entry, Some(&mut *outer))
            .await
            .unwrap();
        pipeline
            .ingest(&png(400, 300), entry, Some(&mut *outer))
            .await
            .unwrap();
        outer.rollback().await.unwrap();

        assert_eq!(store.attachment_count().await, 0);
        assert_eq!(store.image_count().await, 0);
    }
}
