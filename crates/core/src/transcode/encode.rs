//! Lossy WebP encoding.

use image::DynamicImage;

use super::error::TranscodeError;

/// Encode an image as lossy WebP at the given quality (0-100).
///
/// The `webp` encoder only accepts RGB8/RGBA8 buffers, so the input is
/// converted to RGBA first. The encoded stream carries none of the input
/// image's metadata.
pub(crate) fn encode_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, TranscodeError> {
    let rgba = DynamicImage::ImageRgba8(img.to_rgba8());

    let encoder = webp::Encoder::from_image(&rgba)
        .map_err(|reason| TranscodeError::encode(reason.to_string()))?;

    Ok(encoder.encode(quality).to_vec())
}
