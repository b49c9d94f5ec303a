//! Transcode result types.

use bytes::Bytes;

/// Output format tag for transcoded derivatives.
pub const WEBP_FORMAT: &str = "webp";

/// Transient result of a single image conversion.
///
/// Produced by the transcoder or thumbnail generator and consumed
/// immediately by the pipeline; never persisted directly.
#[derive(Debug, Clone)]
pub struct ImageConversionResult {
    /// Encoded output bytes.
    pub bytes: Bytes,
    /// Final pixel width.
    pub width: u32,
    /// Final pixel height.
    pub height: u32,
    /// Output format tag.
    pub format: String,
    /// Normalized density in dots per inch.
    pub density_dpi: u32,
}
