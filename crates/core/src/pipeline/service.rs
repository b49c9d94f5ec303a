//! Media pipeline orchestrator.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use dashmap::DashSet;
use tracing::{debug, warn};

use super::error::PipelineError;
use super::types::{
    derived_blob_name, MediaReference, PipelineStage, PROCESSED_SUFFIX, THUMBNAIL_SUFFIX,
};
use crate::classify::{classify_blob_name, MediaKind};
use crate::delivery::CdnUrlResolver;
use crate::naming::{
    resolve_container_name, validate_container_name, AssetType, ContentSection, NamingContext,
};
use crate::storage::BlobStore;
use crate::thumbnail::ThumbnailGenerator;
use crate::transcode::{ImageTranscoder, WEBP_FORMAT};

/// Orchestrates the ingestion pipeline for a single media asset.
///
/// Safe to share across concurrent requests: the only cross-request state
/// is the blob store itself and the set of containers already verified to
/// exist.
pub struct MediaPipeline<B: BlobStore> {
    store: Arc<B>,
    transcoder: ImageTranscoder,
    thumbnailer: ThumbnailGenerator,
    resolver: CdnUrlResolver,
    verified_containers: DashSet<String>,
}

impl<B: BlobStore> MediaPipeline<B> {
    /// Create a new pipeline over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<B>,
        transcoder: ImageTranscoder,
        thumbnailer: ThumbnailGenerator,
        resolver: CdnUrlResolver,
    ) -> Self {
        Self {
            store,
            transcoder,
            thumbnailer,
            resolver,
            verified_containers: DashSet::new(),
        }
    }

    /// Ingest one asset: classify, derive, store, and resolve URLs.
    ///
    /// Image assets are transcoded and thumbnailed; every other kind is
    /// stored as-is with a single delivery URL. A thumbnail-stage failure
    /// degrades the result instead of failing it: the reference's
    /// thumbnail URL falls back to the primary derivative's URL.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] on invalid input, unroutable
    /// (section, asset type) pairs, primary conversion or timeout
    /// failure, or storage failure during a fatal stage.
    pub async fn process(
        &self,
        section: ContentSection,
        asset_type: AssetType,
        blob_name: &str,
        bytes: Bytes,
    ) -> Result<MediaReference, PipelineError> {
        let ctx = NamingContext::new(section, asset_type);
        let mock = self.resolver.config().mock_storage;

        debug!(stage = PipelineStage::Validating.as_str(), blob_name);
        validate_blob_name(blob_name)?;

        debug!(stage = PipelineStage::Classifying.as_str(), blob_name);
        let kind = classify_blob_name(blob_name);

        let container = resolve_container_name(section, asset_type, mock);
        validate_container_name(&container)?;
        self.ensure_container(&container).await?;

        let reference = match kind {
            MediaKind::Image => self.process_image(ctx, &container, blob_name, bytes).await?,
            _ => self.process_as_is(ctx, &container, blob_name, bytes).await?,
        };

        debug!(
            stage = PipelineStage::Complete.as_str(),
            blob_name,
            degraded = reference.is_degraded(),
        );
        Ok(reference)
    }

    /// Transcode, thumbnail, store, and resolve URLs for an image asset.
    async fn process_image(
        &self,
        ctx: NamingContext,
        container: &str,
        blob_name: &str,
        bytes: Bytes,
    ) -> Result<MediaReference, PipelineError> {
        debug!(stage = PipelineStage::TranscodingPrimary.as_str(), blob_name);
        let converted = self.transcoder.transcode(bytes.clone()).await?;

        debug!(stage = PipelineStage::UploadingPrimary.as_str(), blob_name);
        let processed_name = derived_blob_name(blob_name, PROCESSED_SUFFIX, WEBP_FORMAT);
        self.store.put(container, blob_name, bytes.clone()).await?;
        self.store
            .put(container, &processed_name, converted.bytes.clone())
            .await?;

        debug!(stage = PipelineStage::GeneratingThumbnail.as_str(), blob_name);
        let thumbnail_name = derived_blob_name(blob_name, THUMBNAIL_SUFFIX, WEBP_FORMAT);
        let thumbnail_stored = match self.thumbnailer.generate(bytes).await {
            Ok(thumb) => {
                debug!(stage = PipelineStage::UploadingThumbnail.as_str(), blob_name);
                match self.store.put(container, &thumbnail_name, thumb.bytes).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, blob_name, "thumbnail upload failed; degrading");
                        false
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, blob_name, "thumbnail generation failed; degrading");
                false
            }
        };

        debug!(stage = PipelineStage::ResolvingUrls.as_str(), blob_name);
        let original_url = self.resolver.resolve(ctx, container, blob_name, None)?;
        let cdn_url = self
            .resolver
            .resolve(ctx, container, &processed_name, None)?;
        let thumbnail_url = if thumbnail_stored {
            self.resolver
                .resolve(ctx, container, &thumbnail_name, None)?
        } else {
            cdn_url.clone()
        };

        Ok(MediaReference {
            section: ctx.section,
            asset_type: ctx.asset_type,
            original_blob_name: blob_name.to_string(),
            processed_blob_name: Some(processed_name),
            thumbnail_blob_name: thumbnail_stored.then_some(thumbnail_name),
            original_url,
            cdn_url,
            thumbnail_url,
            width: Some(converted.width),
            height: Some(converted.height),
            format: Some(converted.format),
            created_at: Utc::now(),
        })
    }

    /// Store a non-image asset unchanged and resolve its single URL.
    ///
    /// Metadata extraction for non-image kinds is delegated to an
    /// external collaborator.
    async fn process_as_is(
        &self,
        ctx: NamingContext,
        container: &str,
        blob_name: &str,
        bytes: Bytes,
    ) -> Result<MediaReference, PipelineError> {
        debug!(stage = PipelineStage::UploadingPrimary.as_str(), blob_name);
        self.store.put(container, blob_name, bytes).await?;

        debug!(stage = PipelineStage::ResolvingUrls.as_str(), blob_name);
        let url = self.resolver.resolve(ctx, container, blob_name, None)?;

        Ok(MediaReference {
            section: ctx.section,
            asset_type: ctx.asset_type,
            original_blob_name: blob_name.to_string(),
            processed_blob_name: None,
            thumbnail_blob_name: None,
            original_url: url.clone(),
            cdn_url: url.clone(),
            thumbnail_url: url,
            width: None,
            height: None,
            format: None,
            created_at: Utc::now(),
        })
    }

    /// Verify a container before its first use, once per pipeline.
    async fn ensure_container(&self, container: &str) -> Result<(), PipelineError> {
        if self.verified_containers.contains(container) {
            return Ok(());
        }

        if !self.store.exists(container).await? {
            self.store.create_container(container).await?;
        }
        self.verified_containers.insert(container.to_string());
        Ok(())
    }
}

/// Check a caller-supplied blob name.
///
/// Names containing "mock" are rejected to keep real and simulated
/// storage paths from being crossed accidentally, in either direction.
fn validate_blob_name(blob_name: &str) -> Result<(), PipelineError> {
    if blob_name.is_empty() {
        return Err(PipelineError::validation("blob name must not be empty"));
    }
    if blob_name.contains("mock") {
        return Err(PipelineError::validation(format!(
            "blob name '{blob_name}' must not reference mock storage"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{DeliveryConfig, DeliveryEndpoints};
    use crate::storage::StorageError;
    use crate::thumbnail::ThumbnailConfig;
    use crate::transcode::TranscodeConfig;
    use std::collections::{HashMap, HashSet};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory blob store for testing.
    #[derive(Default)]
    struct MemoryBlobStore {
        blobs: Mutex<HashMap<String, Bytes>>,
        containers: Mutex<HashSet<String>>,
        exists_calls: AtomicUsize,
        /// Puts whose blob name contains this pattern fail.
        fail_puts_matching: Option<&'static str>,
    }

    impl MemoryBlobStore {
        fn new() -> Self {
            Self::default()
        }

        fn failing_puts(pattern: &'static str) -> Self {
            Self {
                fail_puts_matching: Some(pattern),
                ..Self::default()
            }
        }

        fn blob(&self, container: &str, blob_name: &str) -> Option<Bytes> {
            self.blobs
                .lock()
                .unwrap()
                .get(&format!("{container}/{blob_name}"))
                .cloned()
        }

        fn blob_count(&self) -> usize {
            self.blobs.lock().unwrap().len()
        }
    }

    impl BlobStore for MemoryBlobStore {
        async fn put(
            &self,
            container: &str,
            blob_name: &str,
            bytes: Bytes,
        ) -> Result<(), StorageError> {
            if let Some(pattern) = self.fail_puts_matching {
                if blob_name.contains(pattern) {
                    return Err(StorageError::operation("injected put failure"));
                }
            }
            self.blobs
                .lock()
                .unwrap()
                .insert(format!("{container}/{blob_name}"), bytes);
            Ok(())
        }

        async fn exists(&self, container: &str) -> Result<bool, StorageError> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.containers.lock().unwrap().contains(container))
        }

        async fn create_container(&self, container: &str) -> Result<(), StorageError> {
            self.containers.lock().unwrap().insert(container.to_string());
            Ok(())
        }
    }

    fn endpoints() -> DeliveryEndpoints {
        DeliveryEndpoints {
            documents: "https://docs.example.net".to_string(),
            images: "https://img.example.net".to_string(),
            video: "https://video.example.net".to_string(),
            media: "https://media.example.net".to_string(),
            music: "https://music.example.net".to_string(),
        }
    }

    fn pipeline(store: Arc<MemoryBlobStore>) -> MediaPipeline<MemoryBlobStore> {
        MediaPipeline::new(
            store,
            ImageTranscoder::new(TranscodeConfig::default()),
            ThumbnailGenerator::new(ThumbnailConfig::default()),
            CdnUrlResolver::new(DeliveryConfig::new(endpoints())),
        )
    }

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 100, 50]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("png encode");
        Bytes::from(buf.into_inner())
    }

    #[tokio::test]
    async fn test_image_pipeline_happy_path() {
        let store = Arc::new(MemoryBlobStore::new());
        let pipeline = pipeline(store.clone());

        let reference = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "photo.png",
                png_bytes(300, 800),
            )
            .await
            .expect("pipeline run");

        assert_eq!(reference.original_blob_name, "photo.png");
        assert_eq!(reference.processed_blob_name.as_deref(), Some("photo_web.webp"));
        assert_eq!(
            reference.thumbnail_blob_name.as_deref(),
            Some("photo_thumb.webp")
        );
        assert_eq!((reference.width, reference.height), (Some(600), Some(1600)));
        assert_eq!(reference.format.as_deref(), Some("webp"));
        assert!(!reference.is_degraded());

        assert_eq!(
            reference.cdn_url,
            "https://img.example.net/blog-images/photo_web.webp"
        );
        assert_eq!(
            reference.thumbnail_url,
            "https://img.example.net/blog-images/photo_thumb.webp"
        );
        assert!(reference.created_at <= Utc::now());

        // Original, processed, and thumbnail were all stored.
        assert_eq!(store.blob_count(), 3);
        assert!(store.blob("blog-images", "photo.png").is_some());
        assert!(store.blob("blog-images", "photo_web.webp").is_some());
        assert!(store.blob("blog-images", "photo_thumb.webp").is_some());
    }

    #[tokio::test]
    async fn test_thumbnail_upload_failure_degrades() {
        let store = Arc::new(MemoryBlobStore::failing_puts("_thumb"));
        let pipeline = pipeline(store.clone());

        let reference = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "photo.png",
                png_bytes(64, 64),
            )
            .await
            .expect("degraded completion is still success");

        assert!(reference.is_degraded());
        assert_eq!(reference.thumbnail_blob_name, None);
        assert_eq!(reference.thumbnail_url, reference.cdn_url);
        // The stored primary derivative is left in place.
        assert!(store.blob("blog-images", "photo_web.webp").is_some());
    }

    #[tokio::test]
    async fn test_thumbnail_generation_timeout_degrades() {
        let store = Arc::new(MemoryBlobStore::new());
        let pipeline = MediaPipeline::new(
            store.clone(),
            ImageTranscoder::new(TranscodeConfig::default()),
            ThumbnailGenerator::new(ThumbnailConfig::default().with_deadline(Duration::ZERO)),
            CdnUrlResolver::new(DeliveryConfig::new(endpoints())),
        );

        let reference = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "photo.png",
                png_bytes(64, 64),
            )
            .await
            .expect("thumbnail timeout is non-fatal");

        assert!(reference.is_degraded());
        assert_eq!(reference.thumbnail_url, reference.cdn_url);
    }

    #[tokio::test]
    async fn test_primary_upload_failure_is_fatal() {
        let store = Arc::new(MemoryBlobStore::failing_puts("_web"));
        let pipeline = pipeline(store);

        let err = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "photo.png",
                png_bytes(64, 64),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Storage(_)));
    }

    #[tokio::test]
    async fn test_empty_blob_name_rejected() {
        let pipeline = pipeline(Arc::new(MemoryBlobStore::new()));
        let err = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "",
                png_bytes(8, 8),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_mock_blob_name_rejected() {
        let pipeline = pipeline(Arc::new(MemoryBlobStore::new()));
        let err = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "mock-photo.png",
                png_bytes(8, 8),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_image_is_conversion_error() {
        let pipeline = pipeline(Arc::new(MemoryBlobStore::new()));
        let err = pipeline
            .process(
                ContentSection::Blog,
                AssetType::Images,
                "photo.png",
                Bytes::from_static(b"not a png"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_unroutable_pair_is_unsupported_route() {
        let pipeline = pipeline(Arc::new(MemoryBlobStore::new()));
        let err = pipeline
            .process(
                ContentSection::Artwork,
                AssetType::Audio,
                "track.mp3",
                Bytes::from_static(b"audio bytes"),
            )
            .await
            .unwrap_err();

        match err {
            PipelineError::UnsupportedRoute(inner) => {
                let msg = inner.to_string();
                assert!(msg.contains("artwork") && msg.contains("audio"), "{msg}");
            }
            other => panic!("expected UnsupportedRoute, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_image_stored_as_is() {
        let store = Arc::new(MemoryBlobStore::new());
        let pipeline = pipeline(store.clone());

        let payload = Bytes::from_static(b"%PDF-1.7 ...");
        let reference = pipeline
            .process(
                ContentSection::Documents,
                AssetType::Documents,
                "invoice.pdf",
                payload.clone(),
            )
            .await
            .expect("pipeline run");

        assert_eq!(reference.processed_blob_name, None);
        assert_eq!(reference.thumbnail_blob_name, None);
        assert_eq!((reference.width, reference.height), (None, None));
        assert_eq!(reference.format, None);

        // A single URL serves all three fields.
        let url = "https://docs.example.net/documents-documents/invoice.pdf";
        assert_eq!(reference.original_url, url);
        assert_eq!(reference.cdn_url, url);
        assert_eq!(reference.thumbnail_url, url);

        // Bytes are stored unchanged, and only once.
        assert_eq!(store.blob_count(), 1);
        assert_eq!(
            store.blob("documents-documents", "invoice.pdf"),
            Some(payload)
        );
    }

    #[tokio::test]
    async fn test_container_existence_checked_once() {
        let store = Arc::new(MemoryBlobStore::new());
        let pipeline = pipeline(store.clone());

        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            pipeline
                .process(
                    ContentSection::Documents,
                    AssetType::Documents,
                    name,
                    Bytes::from_static(b"doc"),
                )
                .await
                .expect("pipeline run");
        }

        assert_eq!(store.exists_calls.load(Ordering::SeqCst), 1);
    }
}
