//! Pipeline error taxonomy.

use thiserror::Error;

use crate::delivery::DeliveryError;
use crate::naming::NamingError;
use crate::storage::StorageError;
use crate::transcode::TranscodeError;

/// Media pipeline errors.
///
/// Validation, routing, conversion, timeout, and primary-storage
/// failures are fatal and surface to the caller; thumbnail-path failures
/// never appear here — the pipeline degrades instead. No variant is
/// retried automatically.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed or forbidden input name or shape.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No delivery-endpoint rule matches the (section, asset type) pair.
    #[error("unsupported route: {0}")]
    UnsupportedRoute(DeliveryError),

    /// Image decode or encode failure on the primary path.
    #[error("image conversion failed: {0}")]
    Conversion(TranscodeError),

    /// Primary transcode exceeded its deadline.
    #[error("transcode timed out: {0}")]
    Timeout(TranscodeError),

    /// Storage collaborator failure during a fatal stage.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A resolved storage name violated its naming rules.
    #[error("naming error: {0}")]
    Naming(#[from] NamingError),
}

impl PipelineError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DeliveryError> for PipelineError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::UnsupportedRoute { .. } => Self::UnsupportedRoute(err),
            // A mock-targeting blob name is an input problem, not a
            // routing-table problem.
            DeliveryError::MockBlobName { .. } => Self::Validation(err.to_string()),
        }
    }
}

impl From<TranscodeError> for PipelineError {
    fn from(err: TranscodeError) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Conversion(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{AssetType, ContentSection};
    use std::time::Duration;

    #[test]
    fn test_delivery_error_split() {
        let route = DeliveryError::UnsupportedRoute {
            section: ContentSection::Artwork,
            asset_type: AssetType::Audio,
        };
        assert!(matches!(
            PipelineError::from(route),
            PipelineError::UnsupportedRoute(_)
        ));

        let mock = DeliveryError::MockBlobName {
            blob_name: "mock-a.png".to_string(),
        };
        assert!(matches!(
            PipelineError::from(mock),
            PipelineError::Validation(_)
        ));
    }

    #[test]
    fn test_transcode_error_split() {
        let timeout = TranscodeError::DeadlineExceeded {
            deadline: Duration::from_secs(30),
        };
        assert!(matches!(
            PipelineError::from(timeout),
            PipelineError::Timeout(_)
        ));

        let decode = TranscodeError::decode("bad magic");
        assert!(matches!(
            PipelineError::from(decode),
            PipelineError::Conversion(_)
        ));
    }
}
