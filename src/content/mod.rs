//! Headless content source: HTTP client, typed responses and the page/post
//! accessors the rendering layer calls.

mod accessors;
mod client;
mod metrics;
mod types;

pub use accessors::{Fetched, PAGES_ENDPOINT, POSTS_ENDPOINT, SLUG_LIMIT};
pub use client::{query_params, ContentClient, QueryParams};
pub use metrics::{ContentMetrics, MetricsReport};
pub use types::{
    resolve_url, BlogPost, Entry, Envelope, ImageAttributes, ImageData, ImageFormat, ImageRef,
    LandingPage, Meta, PageInfo, Pagination, PostPage, Record, SlugOnly,
};
