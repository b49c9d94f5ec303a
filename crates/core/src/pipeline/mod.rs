//! The media ingestion pipeline.
//!
//! The orchestrator sequences naming, classification, transcoding,
//! thumbnail generation, storage, and URL resolution, and assembles the
//! resulting [`MediaReference`]. Each request is one logical sequence of
//! stages with no cross-request shared state beyond the blob store and
//! the verified-container set.

mod error;
mod service;
mod types;

pub use error::PipelineError;
pub use service::MediaPipeline;
pub use types::{
    derived_blob_name, MediaReference, PipelineStage, PROCESSED_SUFFIX, THUMBNAIL_SUFFIX,
};
