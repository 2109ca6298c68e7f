//! Content-fetch and metadata layer for a localized marketing site.
//!
//! Pages and posts live in a headless CMS; this crate fetches them by locale
//! and slug, derives SEO metadata, and builds the XML sitemap.

pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod seo;
pub mod server;
pub mod sitemap;
pub mod slug;

pub use error::{Error, Result};
