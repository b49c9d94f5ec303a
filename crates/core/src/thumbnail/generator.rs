//! The thumbnail generator.

use std::io::Cursor;
use std::time::{Duration, Instant};

use bytes::Bytes;
use image::ImageReader;
use tokio::task;

use super::config::ThumbnailConfig;
use crate::transcode::{
    encode_webp, read_orientation, resize_exact, ImageConversionResult, TranscodeError,
    WEBP_FORMAT,
};

/// Produces a small preview derivative of an input image.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    config: ThumbnailConfig,
}

impl ThumbnailGenerator {
    /// Create a generator with the given configuration.
    #[must_use]
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Get the generator configuration.
    #[must_use]
    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Generate an upright WebP thumbnail bounded by the configured
    /// longest edge.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError`] on malformed image data or deadline
    /// expiry. Callers treat any failure here as non-fatal for the
    /// pipeline.
    pub async fn generate(&self, input: Bytes) -> Result<ImageConversionResult, TranscodeError> {
        let config = self.config.clone();
        let deadline = Instant::now() + config.deadline;

        task::spawn_blocking(move || generate_blocking(&input, &config, deadline))
            .await
            .map_err(|e| TranscodeError::Worker(e.to_string()))?
    }
}

fn generate_blocking(
    input: &Bytes,
    config: &ThumbnailConfig,
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
    let (out_width, out_height) = bounded_dimensions(width, height, config.max_edge);

    let img = if (out_width, out_height) == (width, height) {
        img
    } else {
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

/// Compute output dimensions under the maximum longest-edge policy.
///
/// Downsizes only: images already within the bound pass through
/// unchanged.
fn bounded_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer == 0 || longer <= max_edge {
        return (width, height);
    }

    let scale = f64::from(max_edge) / f64::from(longer);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |side: u32| (f64::from(side) * scale).round().max(1.0) as u32;

    (scaled(width), scaled(height))
}

fn check_deadline(deadline: Instant, budget: Duration) -> Result<(), TranscodeError> {
    if Instant::now() >= deadline {
        return Err(TranscodeError::DeadlineExceeded { deadline: budget });
    }
    Ok(())
}
