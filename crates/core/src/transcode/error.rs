//! Transcode error types.

use std::time::Duration;

use thiserror::Error;

/// Image conversion errors.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Input could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Output could not be encoded.
    #[error("image encode failed: {0}")]
    Encode(String),

    /// Input byte stream exceeds the configured ceiling.
    #[error("input of {size} bytes exceeds maximum {max} bytes")]
    InputTooLarge {
        /// Actual input size.
        size: u64,
        /// Configured ceiling.
        max: u64,
    },

    /// Probed pixel dimensions exceed the configured ceiling.
    #[error("input dimensions {width}x{height} exceed maximum {max} pixels per side")]
    DimensionsTooLarge {
        /// Probed width.
        width: u32,
        /// Probed height.
        height: u32,
        /// Configured per-side ceiling.
        max: u32,
    },

    /// Transcode exceeded its cooperative deadline.
    #[error("transcode exceeded deadline of {}ms", deadline.as_millis())]
    DeadlineExceeded {
        /// The configured deadline.
        deadline: Duration,
    },

    /// The blocking transcode worker failed to complete.
    #[error("transcode worker failed: {0}")]
    Worker(String),
}

impl TranscodeError {
    /// Create a decode error.
    #[must_use]
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an encode error.
    #[must_use]
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether this error is the deadline cutoff rather than a
    /// conversion failure.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}
