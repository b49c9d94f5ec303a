//! Transcoder configuration.

use std::time::Duration;

/// Configuration for the image transcoder.
///
/// All pipeline defaults live here rather than inline in the conversion
/// code so they can be overridden per deployment and per test.
#[derive(Debug, Clone)]
pub struct TranscodeConfig {
    /// WebP encode quality on a 0-100 scale.
    pub quality: f32,
    /// Minimum short-side dimension in pixels; smaller images are upsized.
    pub min_dimension: u32,
    /// Normalized density reported on conversion results.
    pub dpi: u32,
    /// Maximum accepted input size in bytes.
    pub max_input_bytes: u64,
    /// Maximum accepted width or height in pixels, probed before decode.
    pub max_dimension: u32,
    /// Cooperative cutoff for a single transcode.
    pub deadline: Duration,
}

impl TranscodeConfig {
    /// Default encode quality.
    pub const DEFAULT_QUALITY: f32 = 85.0;
    /// Default minimum short-side dimension.
    pub const DEFAULT_MIN_DIMENSION: u32 = 600;
    /// Default normalized density.
    pub const DEFAULT_DPI: u32 = 96;
    /// Default input byte ceiling: 50MB.
    pub const DEFAULT_MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;
    /// Default per-side pixel ceiling.
    pub const DEFAULT_MAX_DIMENSION: u32 = 8192;
    /// Default transcode deadline: 30 seconds.
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

    /// Set the encode quality.
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the minimum short-side dimension.
    #[must_use]
    pub fn with_min_dimension(mut self, min_dimension: u32) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    /// Set the input byte ceiling.
    #[must_use]
    pub fn with_max_input_bytes(mut self, max_input_bytes: u64) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// Set the per-side pixel ceiling.
    #[must_use]
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Set the transcode deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            quality: Self::DEFAULT_QUALITY,
            min_dimension: Self::DEFAULT_MIN_DIMENSION,
            dpi: Self::DEFAULT_DPI,
            max_input_bytes: Self::DEFAULT_MAX_INPUT_BYTES,
            max_dimension: Self::DEFAULT_MAX_DIMENSION,
            deadline: Self::DEFAULT_DEADLINE,
        }
    }
}
