//! High-quality resizing via `fast_image_resize`.

use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;

use super::error::TranscodeError;

/// Resize an image to exact target dimensions with a Lanczos3 filter.
///
/// Works in RGBA so alpha channels survive the round trip.
pub(crate) fn resize_exact(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TranscodeError> {
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());

    let src = Image::from_vec_u8(width, height, rgba.into_raw(), PixelType::U8x4)
        .map_err(|e| TranscodeError::encode(format!("resize source buffer: {e}")))?;
    let mut dst = Image::new(target_w, target_h, PixelType::U8x4);

    Resizer::new()
        .resize(
            &src,
            &mut dst,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TranscodeError::encode(format!("resize failed: {e}")))?;

    let resized = image::RgbaImage::from_raw(target_w, target_h, dst.into_vec())
        .ok_or_else(|| TranscodeError::encode("resize output buffer mismatch"))?;

    Ok(DynamicImage::ImageRgba8(resized))
}
