//! Thumbnail derivative generation.
//!
//! Thumbnails share the transcoder's orientation-correction and WebP
//! encoding policy but are bounded by a maximum longest edge instead of
//! a minimum short side. Thumbnail failure never affects an
//! already-stored primary derivative; the pipeline degrades instead.

mod config;
mod generator;

pub use config::ThumbnailConfig;
pub use generator::ThumbnailGenerator;
