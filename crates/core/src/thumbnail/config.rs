//! Thumbnail generator configuration.

use std::time::Duration;

/// Configuration for the thumbnail generator.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Maximum longest-edge dimension in pixels; larger images are
    /// downscaled to fit.
    pub max_edge: u32,
    /// WebP encode quality on a 0-100 scale.
    pub quality: f32,
    /// Normalized density reported on conversion results.
    pub dpi: u32,
    /// Cooperative cutoff for a single generation.
    pub deadline: Duration,
}

impl ThumbnailConfig {
    /// Default longest-edge bound.
    pub const DEFAULT_MAX_EDGE: u32 = 320;
    /// Default encode quality, matching the primary transcode policy.
    pub const DEFAULT_QUALITY: f32 = 85.0;
    /// Default normalized density.
    pub const DEFAULT_DPI: u32 = 96;
    /// Default generation deadline: 30 seconds.
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

    /// Set the longest-edge bound.
    #[must_use]
    pub fn with_max_edge(mut self, max_edge: u32) -> Self {
        self.max_edge = max_edge;
        self
    }

    /// Set the encode quality.
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the generation deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_edge: Self::DEFAULT_MAX_EDGE,
            quality: Self::DEFAULT_QUALITY,
            dpi: Self::DEFAULT_DPI,
            deadline: Self::DEFAULT_DEADLINE,
        }
    }
}
