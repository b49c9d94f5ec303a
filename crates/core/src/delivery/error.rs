//! Delivery URL resolution errors.

use thiserror::Error;

use crate::naming::{AssetType, ContentSection};

/// URL resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No routing rule matches the (section, asset type) pair.
    #[error("no delivery route for section '{}' with asset type '{}'", section.as_str(), asset_type.as_str())]
    UnsupportedRoute {
        /// The unmatched content section.
        section: ContentSection,
        /// The unmatched asset type.
        asset_type: AssetType,
    },

    /// A mock-storage resolution was given a blob name that itself
    /// targets mock storage.
    #[error("blob name '{blob_name}' targets mock storage within mock mode")]
    MockBlobName {
        /// The offending blob name.
        blob_name: String,
    },
}
