//! Content section and asset type enumerations.

use serde::{Deserialize, Serialize};

/// Top-level content category driving routing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSection {
    /// Document library content.
    Documents,
    /// Music catalog content.
    Music,
    /// Blog post content.
    Blog,
    /// Artwork gallery content.
    Artwork,
}

impl ContentSection {
    /// Convert to the canonical lowercase string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Music => "music",
            Self::Blog => "blog",
            Self::Artwork => "artwork",
        }
    }

    /// Parse from the canonical string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "documents" => Some(Self::Documents),
            "music" => Some(Self::Music),
            "blog" => Some(Self::Blog),
            "artwork" => Some(Self::Artwork),
            _ => None,
        }
    }
}

/// Media kind classifier used for routing and branch selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Still images.
    Images,
    /// Video files.
    Video,
    /// Generic media files.
    Media,
    /// Document files.
    Documents,
    /// Audio files.
    Audio,
    /// Generated thumbnails.
    Thumbnails,
}

impl AssetType {
    /// Convert to the canonical lowercase string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Video => "video",
            Self::Media => "media",
            Self::Documents => "documents",
            Self::Audio => "audio",
            Self::Thumbnails => "thumbnails",
        }
    }

    /// Parse from the canonical string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "images" => Some(Self::Images),
            "video" => Some(Self::Video),
            "media" => Some(Self::Media),
            "documents" => Some(Self::Documents),
            "audio" => Some(Self::Audio),
            "thumbnails" => Some(Self::Thumbnails),
            _ => None,
        }
    }
}

/// The (section, asset type) pair driving name resolution and URL routing.
///
/// Constructed per request from caller input and discarded after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingContext {
    /// Content section.
    pub section: ContentSection,
    /// Asset type.
    pub asset_type: AssetType,
}

impl NamingContext {
    /// Create a new naming context.
    #[must_use]
    pub fn new(section: ContentSection, asset_type: AssetType) -> Self {
        Self {
            section,
            asset_type,
        }
    }
}
