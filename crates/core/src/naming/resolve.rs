//! Deterministic resolvers from (section, asset type) to storage names.

use super::types::{AssetType, ContentSection};

/// Prefix applied to container names when targeting emulated storage.
const MOCK_PREFIX: &str = "mock-";

/// Resolve the canonical blob container name for a section and asset type.
///
/// Deterministic and side-effect-free. With `mock` set, the mock-storage
/// variant of the name is returned instead. The output always satisfies
/// [`validate_container_name`](super::validate_container_name).
#[must_use]
pub fn resolve_container_name(section: ContentSection, asset_type: AssetType, mock: bool) -> String {
    let name = format!("{}-{}", section.as_str(), asset_type.as_str());
    if mock {
        format!("{MOCK_PREFIX}{name}")
    } else {
        name
    }
}

/// Resolve the canonical metadata table name for a section and asset type.
///
/// The output always satisfies
/// [`validate_table_name`](super::validate_table_name).
#[must_use]
pub fn resolve_table_name(section: ContentSection, asset_type: AssetType) -> String {
    format!("{}{}metadata", section.as_str(), asset_type.as_str())
}

/// Resolve the canonical processing queue name for a section and asset type.
///
/// The output always satisfies
/// [`validate_queue_name`](super::validate_queue_name).
#[must_use]
pub fn resolve_queue_name(section: ContentSection, asset_type: AssetType) -> String {
    format!("{}-{}-ingest", section.as_str(), asset_type.as_str())
}
