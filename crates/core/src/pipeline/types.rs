//! Pipeline result types and canonical derivative naming.

use chrono::{DateTime, Utc};

use crate::naming::{AssetType, ContentSection};

/// Suffix applied to the transcoded primary derivative's blob name.
pub const PROCESSED_SUFFIX: &str = "_web";
/// Suffix applied to the thumbnail derivative's blob name.
pub const THUMBNAIL_SUFFIX: &str = "_thumb";

/// Compute the canonical derived blob name for an original.
///
/// Deterministic: the original's extension is replaced, so
/// `photo.jpg` with suffix `_web` and extension `webp` yields
/// `photo_web.webp`. Names without an extension keep their full stem.
#[must_use]
pub fn derived_blob_name(original: &str, suffix: &str, extension: &str) -> String {
    let stem = original.rsplit_once('.').map_or(original, |(stem, _)| stem);
    format!("{stem}{suffix}.{extension}")
}

/// Stages of a single pipeline run, recorded on tracing events.
///
/// Failures in `Validating`, `TranscodingPrimary`, or `UploadingPrimary`
/// are fatal; thumbnail-stage failures branch to a degraded completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Checking the caller-supplied blob name.
    Validating,
    /// Inferring the asset kind from the blob name.
    Classifying,
    /// Transcoding the primary derivative.
    TranscodingPrimary,
    /// Uploading the original and primary derivative.
    UploadingPrimary,
    /// Generating the thumbnail derivative.
    GeneratingThumbnail,
    /// Uploading the thumbnail derivative.
    UploadingThumbnail,
    /// Resolving public delivery URLs.
    ResolvingUrls,
    /// Finished, possibly degraded.
    Complete,
}

impl PipelineStage {
    /// Convert to the canonical string value for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Classifying => "classifying",
            Self::TranscodingPrimary => "transcoding_primary",
            Self::UploadingPrimary => "uploading_primary",
            Self::GeneratingThumbnail => "generating_thumbnail",
            Self::UploadingThumbnail => "uploading_thumbnail",
            Self::ResolvingUrls => "resolving_urls",
            Self::Complete => "complete",
        }
    }
}

/// The pipeline's output record, handed to the caller for persistence
/// elsewhere.
///
/// Immutable once produced: retries create new references with freshly
/// derived names, never mutate in place. Non-image assets carry `None`
/// for derivative names, dimensions, and format; their three URLs all
/// point at the stored-as-is blob.
#[derive(Debug, Clone)]
pub struct MediaReference {
    /// Content section the asset belongs to.
    pub section: ContentSection,
    /// Asset type supplied by the caller.
    pub asset_type: AssetType,
    /// Original blob name.
    pub original_blob_name: String,
    /// Processed derivative blob name, when an image was transcoded.
    pub processed_blob_name: Option<String>,
    /// Thumbnail blob name, when a thumbnail was stored.
    pub thumbnail_blob_name: Option<String>,
    /// Delivery URL for the original blob.
    pub original_url: String,
    /// Delivery URL for the primary derivative (the original for
    /// non-image assets).
    pub cdn_url: String,
    /// Delivery URL for the thumbnail; falls back to the primary
    /// derivative's URL on degraded completion.
    pub thumbnail_url: String,
    /// Final pixel width of the primary derivative.
    pub width: Option<u32>,
    /// Final pixel height of the primary derivative.
    pub height: Option<u32>,
    /// Output format tag of the primary derivative.
    pub format: Option<String>,
    /// When the reference was created.
    pub created_at: DateTime<Utc>,
}

impl MediaReference {
    /// Whether this reference completed degraded, with the thumbnail URL
    /// falling back to the primary derivative.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.processed_blob_name.is_some() && self.thumbnail_blob_name.is_none()
    }
}
