//! Page metadata (title, description, canonical URL, social previews).

use crate::content::resolve_url;
use crate::i18n::{Locale, LocaleRegistry};
use serde::Serialize;
use std::sync::Arc;

/// Site-wide fallbacks used when a page does not provide its own values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDefaults {
    pub site_name: &'static str,
    pub title: &'static str,
    /// Applied by the rendering layer to page titles; `%s` is the page title
    pub title_template: &'static str,
    pub description: &'static str,
    pub preview_image: &'static str,
    pub preview_width: u32,
    pub preview_height: u32,
    pub twitter_card: &'static str,
    pub twitter_creator: &'static str,
    pub icon: &'static str,
    pub apple_icon: &'static str,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        Self {
            site_name: "SuperDuperAI",
            title: "SuperDuperAI - AI-powered creation tools",
            title_template: "%s | SuperDuperAI",
            description: "Create stunning videos, avatars, and content with SuperDuperAI",
            preview_image: "/images/og-image.jpg",
            preview_width: 1200,
            preview_height: 630,
            twitter_card: "summary_large_image",
            twitter_creator: "@superduperai",
            icon: "/favicon.ico",
            apple_icon: "/apple-touch-icon.png",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Website,
    Article,
}

/// Inputs for [`MetadataBuilder::build`]. Only the locale is required.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub preview_image: Option<String>,
    pub no_index: bool,
    pub locale: Locale,
    pub slug: Option<String>,
    pub kind: ContentKind,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
}

impl MetadataFields {
    pub fn new(locale: Locale) -> Self {
        Self {
            title: None,
            description: None,
            keywords: Vec::new(),
            preview_image: None,
            no_index: false,
            locale,
            slug: None,
            kind: ContentKind::Website,
            published_time: None,
            modified_time: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }

    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn preview_image(mut self, url: Option<String>) -> Self {
        self.preview_image = url;
        self
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Mark as an article with optional publish/modify timestamps.
    pub fn article(mut self, published: Option<String>, modified: Option<String>) -> Self {
        self.kind = ContentKind::Article;
        self.published_time = published;
        self.modified_time = modified;
        self
    }
}

/// Metadata handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub title_template: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub robots: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub icons: Icons,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub locale: Locale,
    pub images: Vec<PreviewImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleTiming>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleTiming {
    pub published_time: String,
    pub modified_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub creator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icons {
    pub icon: String,
    pub apple: String,
}

pub const ROBOTS_INDEX: &str = "index, follow";
pub const ROBOTS_NO_INDEX: &str = "noindex, nofollow";

/// Derives [`PageMetadata`] for the public site.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    base_url: String,
    registry: Arc<LocaleRegistry>,
    defaults: SiteDefaults,
}

impl MetadataBuilder {
    pub fn new(base_url: impl Into<String>, registry: Arc<LocaleRegistry>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            registry,
            defaults: SiteDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: SiteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// `base + ("" | "/{locale}") + ("" | "/{slug}")`
    pub fn canonical_url(&self, locale: Locale, slug: Option<&str>) -> String {
        let mut url = format!("{}{}", self.base_url, self.registry.path_prefix(locale));
        if let Some(slug) = slug.filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(slug);
        }
        url
    }

    pub fn build(&self, fields: &MetadataFields) -> PageMetadata {
        let defaults = &self.defaults;
        let title = non_empty(&fields.title);
        let description = non_empty(&fields.description)
            .unwrap_or(defaults.description)
            .to_string();
        let canonical = self.canonical_url(fields.locale, fields.slug.as_deref());

        let preview_url = resolve_url(
            &self.base_url,
            non_empty(&fields.preview_image).unwrap_or(defaults.preview_image),
        );

        // Modified falls back to published; no published time, no article block
        let article = match (fields.kind, non_empty(&fields.published_time)) {
            (ContentKind::Article, Some(published)) => Some(ArticleTiming {
                published_time: published.to_string(),
                modified_time: non_empty(&fields.modified_time)
                    .unwrap_or(published)
                    .to_string(),
            }),
            _ => None,
        };

        PageMetadata {
            title: title.unwrap_or(defaults.title).to_string(),
            title_template: defaults.title_template.to_string(),
            description: description.clone(),
            keywords: fields.keywords.clone(),
            canonical: canonical.clone(),
            robots: if fields.no_index {
                ROBOTS_NO_INDEX
            } else {
                ROBOTS_INDEX
            }
            .to_string(),
            open_graph: OpenGraph {
                kind: fields.kind,
                site_name: defaults.site_name.to_string(),
                title: title.unwrap_or(defaults.title).to_string(),
                description,
                url: canonical,
                locale: fields.locale,
                images: vec![PreviewImage {
                    url: preview_url,
                    width: defaults.preview_width,
                    height: defaults.preview_height,
                    alt: title.unwrap_or(defaults.site_name).to_string(),
                }],
                article,
            },
            twitter: TwitterCard {
                card: defaults.twitter_card.to_string(),
                creator: defaults.twitter_creator.to_string(),
            },
            icons: Icons {
                icon: defaults.icon.to_string(),
                apple: defaults.apple_icon.to_string(),
            },
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_builder() -> (MetadataBuilder, Arc<LocaleRegistry>) {
        let registry = Arc::new(LocaleRegistry::default());
        (
            MetadataBuilder::new("https://superduperai.co", Arc::clone(&registry)),
            registry,
        )
    }

    // ==================== Canonical URL Tests ====================

    #[test]
    fn test_canonical_default_locale_omits_prefix() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.resolve("en").unwrap()).slug("blog");

        assert_eq!(builder.build(&fields).canonical, "https://superduperai.co/blog");
    }

    #[test]
    fn test_canonical_other_locale_has_prefix() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.resolve("es").unwrap()).slug("blog");

        assert_eq!(builder.build(&fields).canonical, "https://superduperai.co/es/blog");
    }

    #[test]
    fn test_canonical_without_slug() {
        let (builder, registry) = create_builder();
        assert_eq!(
            builder.canonical_url(registry.default_locale(), None),
            "https://superduperai.co"
        );
        assert_eq!(
            builder.canonical_url(registry.resolve("ru").unwrap(), Some("")),
            "https://superduperai.co/ru"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_trimmed() {
        let registry = Arc::new(LocaleRegistry::default());
        let builder = MetadataBuilder::new("https://superduperai.co/", Arc::clone(&registry));
        assert_eq!(
            builder.canonical_url(registry.default_locale(), Some("about")),
            "https://superduperai.co/about"
        );
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_missing_title_uses_site_default() {
        let (builder, registry) = create_builder();
        let metadata = builder.build(&MetadataFields::new(registry.default_locale()));

        assert_eq!(metadata.title, "SuperDuperAI - AI-powered creation tools");
        assert_eq!(metadata.open_graph.title, metadata.title);
        assert_eq!(metadata.open_graph.images[0].alt, "SuperDuperAI");
        assert_eq!(
            metadata.description,
            "Create stunning videos, avatars, and content with SuperDuperAI"
        );
    }

    #[test]
    fn test_empty_title_treated_as_missing() {
        let (builder, registry) = create_builder();
        let metadata = builder.build(&MetadataFields::new(registry.default_locale()).title(""));
        assert_eq!(metadata.title, SiteDefaults::default().title);
    }

    #[test]
    fn test_provided_fields_are_used() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.default_locale())
            .title("Pricing")
            .description(Some("Plans for every team"))
            .keywords(vec!["pricing".to_string(), "plans".to_string()])
            .slug("pricing");
        let metadata = builder.build(&fields);

        assert_eq!(metadata.title, "Pricing");
        assert_eq!(metadata.description, "Plans for every team");
        assert_eq!(metadata.keywords.len(), 2);
        assert_eq!(metadata.open_graph.url, "https://superduperai.co/pricing");
        assert_eq!(metadata.open_graph.images[0].alt, "Pricing");
        assert_eq!(metadata.open_graph.kind, ContentKind::Website);
        assert_eq!(metadata.title_template, "%s | SuperDuperAI");
    }

    // ==================== Preview Image Tests ====================

    #[test]
    fn test_default_preview_image_is_absolute() {
        let (builder, registry) = create_builder();
        let image = &builder
            .build(&MetadataFields::new(registry.default_locale()))
            .open_graph
            .images[0];

        assert_eq!(image.url, "https://superduperai.co/images/og-image.jpg");
        assert_eq!((image.width, image.height), (1200, 630));
    }

    #[test]
    fn test_absolute_preview_image_kept() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.default_locale())
            .preview_image(Some("https://cms.example.com/uploads/hero.jpg".to_string()));

        assert_eq!(
            builder.build(&fields).open_graph.images[0].url,
            "https://cms.example.com/uploads/hero.jpg"
        );
    }

    #[test]
    fn test_custom_site_defaults() {
        let (builder, registry) = create_builder();
        let builder = builder.with_defaults(SiteDefaults {
            site_name: "Acme",
            title: "Acme - Tools",
            preview_image: "https://cdn.acme.test/og.png",
            ..SiteDefaults::default()
        });
        let metadata = builder.build(&MetadataFields::new(registry.default_locale()));

        assert_eq!(metadata.title, "Acme - Tools");
        assert_eq!(metadata.open_graph.site_name, "Acme");
        assert_eq!(metadata.open_graph.images[0].url, "https://cdn.acme.test/og.png");
    }

    // ==================== Robots Tests ====================

    #[test]
    fn test_robots_directive() {
        let (builder, registry) = create_builder();
        let locale = registry.default_locale();

        assert_eq!(builder.build(&MetadataFields::new(locale)).robots, "index, follow");
        assert_eq!(
            builder.build(&MetadataFields::new(locale).no_index()).robots,
            "noindex, nofollow"
        );
    }

    // ==================== Article Tests ====================

    #[test]
    fn test_article_modified_defaults_to_published() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.default_locale())
            .article(Some("2024-03-01".to_string()), None);
        let metadata = builder.build(&fields);

        assert_eq!(metadata.open_graph.kind, ContentKind::Article);
        assert_eq!(
            metadata.open_graph.article,
            Some(ArticleTiming {
                published_time: "2024-03-01".to_string(),
                modified_time: "2024-03-01".to_string(),
            })
        );
    }

    #[test]
    fn test_article_with_modified_time() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.default_locale()).article(
            Some("2024-03-01".to_string()),
            Some("2024-04-01T12:00:00Z".to_string()),
        );

        let article = builder.build(&fields).open_graph.article.unwrap();
        assert_eq!(article.modified_time, "2024-04-01T12:00:00Z");
    }

    #[test]
    fn test_article_without_published_time_has_no_timing() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.default_locale())
            .article(None, Some("2024-04-01".to_string()));

        let metadata = builder.build(&fields);
        assert_eq!(metadata.open_graph.kind, ContentKind::Article);
        assert!(metadata.open_graph.article.is_none());
    }

    #[test]
    fn test_website_ignores_published_time() {
        let (builder, registry) = create_builder();
        let mut fields = MetadataFields::new(registry.default_locale());
        fields.published_time = Some("2024-03-01".to_string());

        assert!(builder.build(&fields).open_graph.article.is_none());
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_metadata_serialization_shape() {
        let (builder, registry) = create_builder();
        let fields = MetadataFields::new(registry.resolve("es").unwrap())
            .title("Hola")
            .slug("hola");
        let json = serde_json::to_value(builder.build(&fields)).expect("Should serialize");

        assert_eq!(json["canonical"], "https://superduperai.co/es/hola");
        assert_eq!(json["openGraph"]["type"], "website");
        assert_eq!(json["openGraph"]["siteName"], "SuperDuperAI");
        assert_eq!(json["openGraph"]["locale"], "es");
        assert_eq!(json["twitter"]["card"], "summary_large_image");
        assert!(json["openGraph"].get("article").is_none());
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_build_is_idempotent(title in ".{0,40}", slug in "[a-z0-9-]{0,20}", no_index in any::<bool>()) {
            let (builder, registry) = create_builder();
            let mut fields = MetadataFields::new(registry.resolve("ru").unwrap()).title(title).slug(slug);
            fields.no_index = no_index;

            prop_assert_eq!(builder.build(&fields), builder.build(&fields));
        }

        #[test]
        fn prop_canonical_prefix_rule(index in 0usize..3, slug in "[a-z0-9][a-z0-9-]{0,20}") {
            let (builder, registry) = create_builder();
            let locale = registry.resolve(registry.codes()[index]).unwrap();
            let canonical = builder.canonical_url(locale, Some(slug.as_str()));

            if registry.is_default(locale) {
                prop_assert_eq!(canonical, format!("https://superduperai.co/{}", slug));
            } else {
                prop_assert_eq!(canonical, format!("https://superduperai.co/{}/{}", locale, slug));
            }
        }
    }
}
