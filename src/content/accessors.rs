//! Page and post queries built on the content client.
//!
//! Accessors never fail: content-source errors are logged, counted and
//! replaced by an empty value, with the error kept on the returned
//! [`Fetched`] so callers can tell "no content" from "source down".

use crate::content::client::{query_params, ContentClient};
use crate::content::types::{BlogPost, Entry, LandingPage, PageInfo, PostPage, Record, SlugOnly};
use crate::error::Error;
use crate::i18n::Locale;
use serde::de::DeserializeOwned;
use tracing::warn;

pub const PAGES_ENDPOINT: &str = "landing-pages";
pub const POSTS_ENDPOINT: &str = "blog-posts";

/// Ceiling on slugs returned by `get_all_page_slugs`.
pub const SLUG_LIMIT: u32 = 500;

/// Result of an accessor call.
///
/// `value` is the fetched data, or the empty fallback when the content
/// source failed, in which case `error` holds the cause.
#[derive(Debug)]
pub struct Fetched<T> {
    pub value: T,
    pub error: Option<Error>,
}

impl<T> Fetched<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn degraded(fallback: T, error: Error) -> Self {
        Self {
            value: fallback,
            error: Some(error),
        }
    }

    /// Whether the value is a fallback standing in for a failed fetch.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl ContentClient {
    /// Fetch one landing page by slug. `None` when nothing matches or the
    /// content source failed.
    pub async fn get_page_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Fetched<Option<Record<LandingPage>>> {
        self.find_by_slug(PAGES_ENDPOINT, slug, locale).await
    }

    /// Fetch one blog post by slug.
    pub async fn get_post_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Fetched<Option<Record<BlogPost>>> {
        self.find_by_slug(POSTS_ENDPOINT, slug, locale).await
    }

    /// List landing page slugs, always queried in the default locale.
    pub async fn get_all_page_slugs(&self) -> Fetched<Vec<String>> {
        let params = query_params([
            ("fields[0]".to_string(), "slug".to_string()),
            ("pagination[limit]".to_string(), SLUG_LIMIT.to_string()),
        ]);

        match self
            .fetch::<Option<Vec<Entry<SlugOnly>>>>(PAGES_ENDPOINT, self.default_locale(), &params)
            .await
        {
            Ok(envelope) => Fetched::ok(
                envelope
                    .data
                    .unwrap_or_default()
                    .into_iter()
                    .map(|entry| entry.attributes.fields.slug)
                    .filter(|slug| !slug.is_empty())
                    .collect(),
            ),
            Err(e) => self.fallback(PAGES_ENDPOINT, self.default_locale(), Vec::new(), e),
        }
    }

    /// List blog posts newest first, one page at a time.
    ///
    /// On failure the fallback is a single empty page regardless of the
    /// page requested.
    pub async fn get_all_posts(&self, locale: Locale, page: u32, page_size: u32) -> Fetched<PostPage> {
        let params = query_params([
            ("populate".to_string(), "*".to_string()),
            ("sort".to_string(), "publishDate:desc".to_string()),
            ("pagination[page]".to_string(), page.to_string()),
            ("pagination[pageSize]".to_string(), page_size.to_string()),
        ]);

        match self
            .fetch::<Option<Vec<Entry<BlogPost>>>>(POSTS_ENDPOINT, locale, &params)
            .await
        {
            Ok(envelope) => {
                let posts: Vec<Record<BlogPost>> = envelope
                    .data
                    .unwrap_or_default()
                    .into_iter()
                    .map(|entry| entry.attributes)
                    .collect();

                let pagination = envelope
                    .meta
                    .pagination
                    .map(PageInfo::from)
                    .unwrap_or(PageInfo {
                        page: 1,
                        page_count: 1,
                        total: posts.len() as u32,
                    });

                Fetched::ok(PostPage { posts, pagination })
            }
            Err(e) => self.fallback(POSTS_ENDPOINT, locale, PostPage::empty(), e),
        }
    }

    async fn find_by_slug<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        slug: &str,
        locale: Locale,
    ) -> Fetched<Option<Record<T>>> {
        let params = query_params([("filters[slug][$eq]", slug), ("populate", "*")]);

        match self
            .fetch::<Option<Vec<Entry<T>>>>(endpoint, locale, &params)
            .await
        {
            Ok(envelope) => {
                let entries = envelope.data.unwrap_or_default();
                if entries.len() > 1 {
                    warn!(
                        "{} records in {} matched slug '{}' ({}); using the most recently published",
                        entries.len(),
                        endpoint,
                        slug,
                        locale
                    );
                }
                Fetched::ok(select_match(entries, locale))
            }
            Err(e) => self.fallback(endpoint, locale, None, e),
        }
    }

    fn fallback<T>(&self, endpoint: &str, locale: Locale, empty: T, error: Error) -> Fetched<T> {
        warn!(
            "Content fetch from {} ({}) failed, serving empty result: {}",
            endpoint, locale, error
        );
        self.metrics().record_fallback();
        Fetched::degraded(empty, error)
    }
}

/// Pick the authoritative record among slug matches: records in the
/// requested locale first, then the latest `publishedAt`; ties keep the
/// content source's order.
fn select_match<T>(entries: Vec<Entry<T>>, locale: Locale) -> Option<Record<T>> {
    entries
        .into_iter()
        .map(|entry| entry.attributes)
        .enumerate()
        .max_by(|(index_a, a), (index_b, b)| {
            let rank_a = (a.locale.as_deref() == Some(locale.code()), a.published_at);
            let rank_b = (b.locale.as_deref() == Some(locale.code()), b.published_at);
            rank_a.cmp(&rank_b).then(index_b.cmp(index_a))
        })
        .map(|(_, record)| record)
}
