//! The image transcoder.

use std::io::Cursor;
use std::time::{Duration, Instant};

use bytes::Bytes;
use image::ImageReader;
use tokio::task;
use tracing::debug;

use super::config::TranscodeConfig;
use super::error::TranscodeError;
use super::orientation::read_orientation;
use super::types::{ImageConversionResult, WEBP_FORMAT};
use super::{encode_webp, resize_exact};

/// Normalizes input images to upright, minimum-dimension WebP.
///
/// Stateless apart from its configuration; safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct ImageTranscoder {
    config: TranscodeConfig,
}

impl ImageTranscoder {
    /// Create a transcoder with the given configuration.
    #[must_use]
    pub fn new(config: TranscodeConfig) -> Self {
        Self { config }
    }

    /// Get the transcoder configuration.
    #[must_use]
    pub fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    /// Convert an input image to upright WebP at the configured quality,
    /// upsizing so the shorter side is at least the configured minimum.
    ///
    /// Never retries internally; decode/encode runs on the blocking pool
    /// with the configured deadline checked between stages.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError`] on oversized input, malformed image
    /// data, or deadline expiry.
    pub async fn transcode(&self, input: Bytes) -> Result<ImageConversionResult, TranscodeError> {
        guard_input_size(&input, &self.config)?;

        let config = self.config.clone();
        let deadline = Instant::now() + config.deadline;

        task::spawn_blocking(move || transcode_blocking(&input, &config, deadline))
            .await
            .map_err(|e| TranscodeError::Worker(e.to_string()))?
    }
}

/// Reject oversized inputs before any decode work.
fn guard_input_size(input: &Bytes, config: &TranscodeConfig) -> Result<(), TranscodeError> {
    let size = input.len() as u64;
    if size > config.max_input_bytes {
        return Err(TranscodeError::InputTooLarge {
            size,
            max: config.max_input_bytes,
        });
    }

    let (width, height) = ImageReader::new(Cursor::new(input.as_ref()))
        .with_guessed_format()
        .map_err(|e| TranscodeError::decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| TranscodeError::decode(e.to_string()))?;

    if width > config.max_dimension || height > config.max_dimension {
        return Err(TranscodeError::DimensionsTooLarge {
            width,
            height,
            max: config.max_dimension,
        });
    }

    Ok(())
}

fn transcode_blocking(
    input: &Bytes,
    config: &TranscodeConfig,
    deadline: Instant,
) -> Result<ImageConversionResult, TranscodeError> {
    let orientation = read_orientation(input);
    check_deadline(deadline, config.deadline)?;

    let img = ImageReader::new(Cursor::new(input.as_ref()))
        .with_guessed_format()
        .map_err(|e| TranscodeError::decode(e.to_string()))?
        .decode()
        .map_err(|e| TranscodeError::decode(e.to_string()))?;
    check_deadline(deadline, config.deadline)?;

    let img = match orientation {
        Some(o) => o.correct(img),
        None => img,
    };

    let (width, height) = (img.width(), img.height());
    let (out_width, out_height) = scaled_dimensions(width, height, config.min_dimension);

    let img = if (out_width, out_height) == (width, height) {
        img
    } else {
        debug!(width, height, out_width, out_height, "upsizing image");
        resize_exact(&img, out_width, out_height)?
    };
    check_deadline(deadline, config.deadline)?;

    let bytes = encode_webp(&img, config.quality)?;

    Ok(ImageConversionResult {
        bytes: Bytes::from(bytes),
        width: out_width,
        height: out_height,
        format: WEBP_FORMAT.to_string(),
        density_dpi: config.dpi,
    })
}

/// Compute output dimensions under the minimum short-side policy.
///
/// Upsizes only: when the shorter side is already at or above the
/// minimum, dimensions pass through unchanged.
fn scaled_dimensions(width: u32, height: u32, min_dimension: u32) -> (u32, u32) {
    let shorter = width.min(height);
    if shorter == 0 || shorter >= min_dimension {
        return (width, height);
    }

    let scale = f64::from(min_dimension) / f64::from(shorter);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |side: u32| (f64::from(side) * scale).round() as u32;

    (scaled(width), scaled(height))
}

fn check_deadline(deadline: Instant, budget: Duration) -> Result<(), TranscodeError> {
    if Instant::now() >= deadline {
        return Err(TranscodeError::DeadlineExceeded { deadline: budget });
    }
    Ok(())
}
