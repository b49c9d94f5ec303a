//! Image transcoding to a normalized delivery format.
//!
//! The transcoder decodes an arbitrary-format input image, corrects EXIF
//! orientation, upsizes undersized images to a minimum short-side
//! dimension, and re-encodes as lossy WebP at a configured quality. The
//! re-encode drops all input metadata.

mod config;
mod encode;
mod error;
mod orientation;
mod resize;
mod transcoder;
mod types;

pub use config::TranscodeConfig;
pub use error::TranscodeError;
pub use orientation::{read_orientation, Orientation};
pub use transcoder::ImageTranscoder;
pub use types::{ImageConversionResult, WEBP_FORMAT};

pub(crate) use encode::encode_webp;
pub(crate) use resize::resize_exact;
