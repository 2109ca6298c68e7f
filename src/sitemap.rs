//! XML sitemap with alternate-locale links for every URL.

use crate::i18n::{Locale, LocaleRegistry};
use reqwest::Url;
use std::fmt::Write;
use std::sync::Arc;

pub const SITEMAP_CONTENT_TYPE: &str = "application/xml";
pub const SITEMAP_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLink {
    pub hreflang: Locale,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub locale: Locale,
    pub loc: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    pub alternates: Vec<AlternateLink>,
}

/// Kinds of URL published per locale, with their fixed crawl hints.
#[derive(Debug, Clone, Copy)]
enum Route<'a> {
    Root,
    BlogIndex,
    Content(&'a str),
}

impl Route<'_> {
    fn change_frequency(&self) -> ChangeFrequency {
        match self {
            Route::Root | Route::BlogIndex => ChangeFrequency::Daily,
            Route::Content(_) => ChangeFrequency::Weekly,
        }
    }

    fn priority(&self) -> f32 {
        match self {
            Route::Root => 1.0,
            Route::BlogIndex => 0.8,
            Route::Content(_) => 0.7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    base_url: String,
    registry: Arc<LocaleRegistry>,
}

impl SitemapBuilder {
    pub fn new(base_url: impl Into<String>, registry: Arc<LocaleRegistry>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            registry,
        }
    }

    /// One entry per locale for the root, the blog index and each slug.
    pub fn entries(&self, slugs: &[String]) -> Vec<SitemapEntry> {
        let routes: Vec<Route<'_>> = [Route::Root, Route::BlogIndex]
            .into_iter()
            .chain(slugs.iter().map(|slug| Route::Content(slug.as_str())))
            .collect();

        self.registry
            .locales()
            .flat_map(|locale| routes.iter().map(move |route| (locale, *route)))
            .map(|(locale, route)| SitemapEntry {
                locale,
                loc: self.url_for(locale, &route),
                change_frequency: route.change_frequency(),
                priority: route.priority(),
                alternates: self
                    .registry
                    .locales()
                    .map(|alt| AlternateLink {
                        hreflang: alt,
                        href: self.url_for(alt, &route),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Render the sitemap document for the given slugs.
    pub fn build(&self, slugs: &[String]) -> String {
        render(&self.entries(slugs))
    }

    fn url_for(&self, locale: Locale, route: &Route<'_>) -> String {
        let prefix = format!("{}{}", self.base_url, self.registry.path_prefix(locale));
        match route {
            Route::Root => prefix,
            Route::BlogIndex => format!("{}/blog", prefix),
            Route::Content(slug) => append_segment(&prefix, slug),
        }
    }
}

/// Append `segment` to `prefix` as one percent-encoded path segment.
fn append_segment(prefix: &str, segment: &str) -> String {
    let mut url = match Url::parse(&format!("{}/", prefix)) {
        Ok(url) => url,
        Err(_) => return format!("{}/{}", prefix, segment),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    url.to_string()
}

/// Render entries as a sitemap `urlset`.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    // Writing to a String cannot fail
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
        for alternate in &entry.alternates {
            let _ = writeln!(
                xml,
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>",
                alternate.hreflang,
                escape_xml(&alternate.href)
            );
        }
        let _ = writeln!(
            xml,
            "    <changefreq>{}</changefreq>",
            entry.change_frequency.as_str()
        );
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
