//! The CDN URL resolver.

use super::config::DeliveryConfig;
use super::error::DeliveryError;
use crate::naming::NamingContext;

/// Resolves public delivery URLs for stored blobs.
///
/// Pure routing over the injected configuration: identical inputs always
/// yield byte-identical URLs.
#[derive(Debug, Clone)]
pub struct CdnUrlResolver {
    config: DeliveryConfig,
}

impl CdnUrlResolver {
    /// Create a resolver over the given configuration.
    #[must_use]
    pub fn new(config: DeliveryConfig) -> Self {
        Self { config }
    }

    /// Get the resolver configuration.
    #[must_use]
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Resolve the public delivery URL for a blob.
    ///
    /// In mock-storage mode the endpoint table is bypassed entirely and
    /// a direct emulator URL is built from the mock-variant container
    /// name; a blob name containing "mock" is rejected there to avoid a
    /// mock-of-a-mock path. This check is independent of the pipeline's
    /// own validation because the resolver can be invoked directly.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::UnsupportedRoute`] when no rule matches
    /// the (section, asset type) pair, or
    /// [`DeliveryError::MockBlobName`] in mock mode.
    pub fn resolve(
        &self,
        ctx: NamingContext,
        container_name: &str,
        blob_name: &str,
        query: Option<&str>,
    ) -> Result<String, DeliveryError> {
        if self.config.mock_storage {
            if blob_name.contains("mock") {
                return Err(DeliveryError::MockBlobName {
                    blob_name: blob_name.to_string(),
                });
            }
            let base = self.config.emulator_base.trim_end_matches('/');
            return Ok(join_url(base, container_name, blob_name, query));
        }

        for (rule, endpoint) in self.config.rules() {
            if rule.matches(&ctx) {
                let base = endpoint.trim_end_matches('/');
                return Ok(join_url(base, container_name, blob_name, query));
            }
        }

        Err(DeliveryError::UnsupportedRoute {
            section: ctx.section,
            asset_type: ctx.asset_type,
        })
    }
}

/// Build `{base}/{container}/{blob}[?{query}]`, stripping any leading
/// `?` from a supplied query string before re-appending.
fn join_url(base: &str, container_name: &str, blob_name: &str, query: Option<&str>) -> String {
    let mut url = format!("{base}/{container_name}/{blob_name}");
    if let Some(query) = query {
        let query = query.trim_start_matches('?');
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{AssetType, ContentSection};
    use rstest::rstest;

    pub(super) fn resolver(mock: bool) -> CdnUrlResolver {
        let endpoints = super::super::config::DeliveryEndpoints {
            documents: "https://docs.example.net".to_string(),
            images: "https://img.example.net".to_string(),
            video: "https://video.example.net".to_string(),
            media: "https://media.example.net".to_string(),
            music: "https://music.example.net".to_string(),
        };
        CdnUrlResolver::new(DeliveryConfig::new(endpoints).with_mock_storage(mock))
    }

    #[rstest]
    // Documents section wins over every asset type.
    #[case(ContentSection::Documents, AssetType::Images, "https://docs.example.net")]
    #[case(ContentSection::Documents, AssetType::Video, "https://docs.example.net")]
    #[case(ContentSection::Documents, AssetType::Audio, "https://docs.example.net")]
    // Asset-type rules outside the Documents section.
    #[case(ContentSection::Blog, AssetType::Images, "https://img.example.net")]
    #[case(ContentSection::Artwork, AssetType::Images, "https://img.example.net")]
    #[case(ContentSection::Blog, AssetType::Video, "https://video.example.net")]
    #[case(ContentSection::Music, AssetType::Media, "https://media.example.net")]
    // Music section is the last rule.
    #[case(ContentSection::Music, AssetType::Audio, "https://music.example.net")]
    fn test_routing_precedence(
        #[case] section: ContentSection,
        #[case] asset_type: AssetType,
        #[case] expected_host: &str,
    ) {
        let url = resolver(false)
            .resolve(
                NamingContext::new(section, asset_type),
                "container",
                "blob.webp",
                None,
            )
            .expect("route");
        assert!(
            url.starts_with(expected_host),
            "{url} does not start with {expected_host}"
        );
    }

    #[test]
    fn test_unmatched_pair_is_unsupported() {
        let err = resolver(false)
            .resolve(
                NamingContext::new(ContentSection::Artwork, AssetType::Audio),
                "container",
                "track.mp3",
                None,
            )
            .unwrap_err();

        assert_eq!(
            err,
            DeliveryError::UnsupportedRoute {
                section: ContentSection::Artwork,
                asset_type: AssetType::Audio,
            }
        );
        assert!(err.to_string().contains("artwork"));
        assert!(err.to_string().contains("audio"));
    }

    #[test]
    fn test_url_shape() {
        let url = resolver(false)
            .resolve(
                NamingContext::new(ContentSection::Blog, AssetType::Images),
                "blog-images",
                "photo_web.webp",
                None,
            )
            .expect("route");
        assert_eq!(url, "https://img.example.net/blog-images/photo_web.webp");
    }

    #[test]
    fn test_query_string_leading_question_mark_stripped() {
        let ctx = NamingContext::new(ContentSection::Blog, AssetType::Images);
        let with_mark = resolver(false)
            .resolve(ctx, "blog-images", "a.webp", Some("?w=100"))
            .expect("route");
        let without_mark = resolver(false)
            .resolve(ctx, "blog-images", "a.webp", Some("w=100"))
            .expect("route");

        assert_eq!(with_mark, "https://img.example.net/blog-images/a.webp?w=100");
        assert_eq!(with_mark, without_mark);
    }

    #[test]
    fn test_mock_mode_bypasses_endpoint_table() {
        let url = resolver(true)
            .resolve(
                NamingContext::new(ContentSection::Artwork, AssetType::Audio),
                "mock-artwork-audio",
                "track.mp3",
                None,
            )
            .expect("mock route never consults the rule table");

        assert_eq!(
            url,
            "http://127.0.0.1:10000/devstoreaccount1/mock-artwork-audio/track.mp3"
        );
    }

    #[test]
    fn test_mock_mode_rejects_mock_blob_names() {
        let ctx = NamingContext::new(ContentSection::Blog, AssetType::Images);
        let err = resolver(true)
            .resolve(ctx, "mock-blog-images", "mock-photo.png", None)
            .unwrap_err();
        assert!(matches!(err, DeliveryError::MockBlobName { .. }));

        // The same name resolves fine outside mock mode.
        assert!(resolver(false)
            .resolve(ctx, "blog-images", "mock-photo.png", None)
            .is_ok());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let ctx = NamingContext::new(ContentSection::Music, AssetType::Audio);
        let a = resolver(false).resolve(ctx, "music-audio", "song.flac", Some("v=1"));
        let b = resolver(false).resolve(ctx, "music-audio", "song.flac", Some("v=1"));
        assert_eq!(a, b);
    }
}
