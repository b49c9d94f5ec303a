//! Delivery endpoint configuration and routing rules.

use serde::{Deserialize, Serialize};

use crate::naming::{AssetType, ContentSection, NamingContext};

/// Base URLs for the public delivery endpoints, one per routing rule.
///
/// Deployment-specific; never hardcoded in the resolver itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryEndpoints {
    /// Documents delivery endpoint.
    pub documents: String,
    /// Images delivery endpoint.
    pub images: String,
    /// Video delivery endpoint.
    pub video: String,
    /// Generic media delivery endpoint.
    pub media: String,
    /// Music delivery endpoint.
    pub music: String,
}

/// A single routing predicate over a naming context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRule {
    /// Matches any asset type within the given section.
    Section(ContentSection),
    /// Matches the given asset type in any section.
    Asset(AssetType),
}

impl RouteRule {
    /// Whether this rule matches the given context.
    #[must_use]
    pub fn matches(&self, ctx: &NamingContext) -> bool {
        match self {
            Self::Section(section) => ctx.section == *section,
            Self::Asset(asset_type) => ctx.asset_type == *asset_type,
        }
    }
}

/// Delivery URL resolution configuration.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Endpoint base URLs.
    pub endpoints: DeliveryEndpoints,
    /// Whether resolution targets emulated storage.
    pub mock_storage: bool,
    /// Emulator base URL used in mock-storage mode.
    pub emulator_base: String,
}

impl DeliveryConfig {
    /// Default emulator base URL (Azurite-style local endpoint).
    pub const DEFAULT_EMULATOR_BASE: &'static str = "http://127.0.0.1:10000/devstoreaccount1";

    /// Create a configuration for the given endpoints with mock mode off.
    #[must_use]
    pub fn new(endpoints: DeliveryEndpoints) -> Self {
        Self {
            endpoints,
            mock_storage: false,
            emulator_base: Self::DEFAULT_EMULATOR_BASE.to_string(),
        }
    }

    /// Enable or disable mock-storage mode.
    #[must_use]
    pub fn with_mock_storage(mut self, mock: bool) -> Self {
        self.mock_storage = mock;
        self
    }

    /// Set the emulator base URL.
    #[must_use]
    pub fn with_emulator_base(mut self, base: impl Into<String>) -> Self {
        self.emulator_base = base.into();
        self
    }

    /// The ordered routing table, evaluated top-to-bottom.
    ///
    /// Order matters: the Documents section overrides asset-type routing,
    /// and asset-type rules override the Music section rule.
    #[must_use]
    pub fn rules(&self) -> [(RouteRule, &str); 5] {
        [
            (
                RouteRule::Section(ContentSection::Documents),
                self.endpoints.documents.as_str(),
            ),
            (
                RouteRule::Asset(AssetType::Images),
                self.endpoints.images.as_str(),
            ),
            (
                RouteRule::Asset(AssetType::Video),
                self.endpoints.video.as_str(),
            ),
            (
                RouteRule::Asset(AssetType::Media),
                self.endpoints.media.as_str(),
            ),
            (
                RouteRule::Section(ContentSection::Music),
                self.endpoints.music.as_str(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> DeliveryEndpoints {
        DeliveryEndpoints {
            documents: "https://docs.example.net".to_string(),
            images: "https://img.example.net".to_string(),
            video: "https://video.example.net".to_string(),
            media: "https://media.example.net".to_string(),
            music: "https://music.example.net".to_string(),
        }
    }

    #[test]
    fn test_rule_matching() {
        let ctx = NamingContext::new(ContentSection::Blog, AssetType::Images);
        assert!(RouteRule::Asset(AssetType::Images).matches(&ctx));
        assert!(!RouteRule::Asset(AssetType::Video).matches(&ctx));
        assert!(!RouteRule::Section(ContentSection::Documents).matches(&ctx));
    }

    #[test]
    fn test_rule_order_documents_first() {
        let config = DeliveryConfig::new(endpoints());
        let rules = config.rules();
        assert_eq!(
            rules[0].0,
            RouteRule::Section(ContentSection::Documents)
        );
        assert_eq!(rules[4].0, RouteRule::Section(ContentSection::Music));
    }

    #[test]
    fn test_config_defaults() {
        let config = DeliveryConfig::new(endpoints());
        assert!(!config.mock_storage);
        assert_eq!(
            config.emulator_base,
            DeliveryConfig::DEFAULT_EMULATOR_BASE
        );
    }
}
