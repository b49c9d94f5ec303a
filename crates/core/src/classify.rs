//! Asset kind classification from blob names.
//!
//! Classification drives branch selection in the pipeline: only image
//! assets enter the transcode and thumbnail branch; every other kind is
//! stored as-is.

use serde::{Deserialize, Serialize};

/// Asset kind inferred from a blob name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image, eligible for transcode and thumbnail generation.
    Image,
    /// Video file.
    Video,
    /// Document file.
    Document,
    /// Audio file.
    Audio,
    /// Anything else.
    Other,
}

impl MediaKind {
    /// Convert to the canonical string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }
}

/// Classify a blob name by its extension's MIME type.
///
/// Names without a recognized extension classify as [`MediaKind::Other`].
#[must_use]
pub fn classify_blob_name(blob_name: &str) -> MediaKind {
    let Some(mime) = mime_guess::from_path(blob_name).first() else {
        return MediaKind::Other;
    };

    match mime.type_().as_str() {
        "image" => MediaKind::Image,
        "video" => MediaKind::Video,
        "audio" => MediaKind::Audio,
        "text" => MediaKind::Document,
        "application" => match mime.subtype().as_str() {
            "pdf" | "msword" | "rtf" => MediaKind::Document,
            s if s.contains("wordprocessingml") || s.contains("spreadsheetml") => {
                MediaKind::Document
            }
            _ => MediaKind::Other,
        },
        _ => MediaKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_images() {
        for name in ["photo.jpg", "photo.jpeg", "icon.png", "anim.gif", "a.webp"] {
            assert_eq!(classify_blob_name(name), MediaKind::Image, "{name}");
        }
    }

    #[test]
    fn test_classify_video_and_audio() {
        assert_eq!(classify_blob_name("clip.mp4"), MediaKind::Video);
        assert_eq!(classify_blob_name("clip.webm"), MediaKind::Video);
        assert_eq!(classify_blob_name("track.mp3"), MediaKind::Audio);
        assert_eq!(classify_blob_name("track.flac"), MediaKind::Audio);
    }

    #[test]
    fn test_classify_documents() {
        assert_eq!(classify_blob_name("invoice.pdf"), MediaKind::Document);
        assert_eq!(classify_blob_name("notes.txt"), MediaKind::Document);
        assert_eq!(classify_blob_name("report.docx"), MediaKind::Document);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify_blob_name("archive.zip"), MediaKind::Other);
        assert_eq!(classify_blob_name("no-extension"), MediaKind::Other);
        assert_eq!(classify_blob_name("binary.xyzunknown"), MediaKind::Other);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify_blob_name("PHOTO.JPG"), MediaKind::Image);
    }
}
