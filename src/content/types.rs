use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Treat an explicit `null` like a missing key.
///
/// The content API sends `null` for optional fields left empty in the
/// editor and for image `formats` it did not generate (SVGs, tiny images).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response wrapper returned by every content API collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block of an envelope.
///
/// Limit-style queries (`pagination[limit]`) answer with `start`/`limit`
/// instead of page fields, so every field is optional on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

/// One item of a collection response.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry<T> {
    pub id: u64,
    pub attributes: Record<T>,
}

/// Flattened attributes of a fetched page or post: the domain fields plus
/// the system fields every entry carries.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    #[serde(flatten)]
    pub fields: T,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Editorial publish date, as entered in the CMS (date or datetime)
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<ImageRef>,
}

/// Projection used when only slugs are requested.
#[derive(Debug, Clone, Deserialize)]
pub struct SlugOnly {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// Media relation as returned with `populate=*`. `data` is null when no
/// image is attached.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ImageRef {
    #[serde(default)]
    pub data: Option<ImageData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageData {
    pub id: u64,
    pub attributes: ImageAttributes,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageAttributes {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Named size variants (thumbnail, small, medium, large)
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: BTreeMap<String, ImageFormat>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageFormat {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl ImageRef {
    /// Asset URL as stored by the content source (often a relative path).
    pub fn url(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.attributes.url.as_str())
    }

    /// A named size variant, if the content source generated one.
    pub fn format(&self, name: &str) -> Option<&ImageFormat> {
        self.data
            .as_ref()
            .and_then(|data| data.attributes.formats.get(name))
    }

    /// Asset URL resolved against the content API base.
    pub fn absolute_url(&self, content_base: &str) -> Option<String> {
        self.url().map(|url| resolve_url(content_base, url))
    }
}

/// Resolve `url` against `base` unless it is already absolute.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//") {
        return url.to_string();
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// Pagination details handed to the rendering layer with a post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_count: u32,
    pub total: u32,
}

impl PageInfo {
    /// A single empty page, used when the listing could not be fetched.
    pub fn empty() -> Self {
        Self {
            page: 1,
            page_count: 1,
            total: 0,
        }
    }
}

impl From<Pagination> for PageInfo {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            page_count: pagination.page_count,
            total: pagination.total,
        }
    }
}

/// One page of blog posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub posts: Vec<Record<BlogPost>>,
    pub pagination: PageInfo,
}

impl PostPage {
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            pagination: PageInfo::empty(),
        }
    }
}
