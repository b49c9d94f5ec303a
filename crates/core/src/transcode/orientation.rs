//! EXIF orientation correction.
//!
//! Stored pixels are rotated upright before encoding; the orientation tag
//! itself is discarded along with the rest of the input metadata.

use std::io::Cursor;

use image::DynamicImage;

/// EXIF orientation tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Upright.
    Normal,
    /// Mirrored horizontally.
    FlipHorizontal,
    /// Rotated 180 degrees.
    Rotate180,
    /// Mirrored vertically.
    FlipVertical,
    /// Rotated 90 degrees clockwise, then mirrored horizontally.
    Transpose,
    /// Rotated 90 degrees clockwise.
    Rotate90,
    /// Rotated 270 degrees clockwise, then mirrored horizontally.
    Transverse,
    /// Rotated 270 degrees clockwise.
    Rotate270,
}

impl Orientation {
    /// Create from the raw EXIF tag value (1-8).
    #[must_use]
    pub fn from_tag(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// Rotate and flip decoded pixels so the result is upright.
    #[must_use]
    pub fn correct(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => img,
            Self::FlipHorizontal => img.fliph(),
            Self::Rotate180 => img.rotate180(),
            Self::FlipVertical => img.flipv(),
            Self::Transpose => img.rotate90().fliph(),
            Self::Rotate90 => img.rotate90(),
            Self::Transverse => img.rotate270().fliph(),
            Self::Rotate270 => img.rotate270(),
        }
    }
}

/// Read the EXIF orientation tag from raw image bytes.
///
/// Returns `None` when the input carries no readable EXIF data or no
/// orientation field; callers treat that as already upright.
#[must_use]
pub fn read_orientation(data: &[u8]) -> Option<Orientation> {
    let mut cursor = Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let value = u16::try_from(field.value.get_uint(0)?).ok()?;

    Orientation::from_tag(value)
}
