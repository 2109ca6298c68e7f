use crate::config::Config;
use crate::content::{BlogPost, ContentClient, LandingPage, PageInfo, Record};
use crate::i18n::{Locale, LocaleRegistry, MessageCatalog};
use crate::seo::{MetadataBuilder, MetadataFields, PageMetadata};
use crate::sitemap::{SitemapBuilder, SITEMAP_CACHE_CONTROL, SITEMAP_CONTENT_TYPE};
use crate::slug::is_routable_slug;
use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Shared, read-only state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LocaleRegistry>,
    pub messages: Arc<MessageCatalog>,
    pub content: Arc<ContentClient>,
    pub metadata: Arc<MetadataBuilder>,
    pub sitemap: Arc<SitemapBuilder>,
}

impl AppState {
    /// Wire up the content layer. Fails if any registered locale lacks a
    /// message bundle.
    pub fn new(config: &Config, registry: LocaleRegistry) -> crate::Result<Self> {
        let messages = MessageCatalog::load(&registry)?;
        let content = ContentClient::new(config, &registry);
        let registry = Arc::new(registry);

        Ok(Self {
            metadata: Arc::new(MetadataBuilder::new(
                &config.site_base_url,
                Arc::clone(&registry),
            )),
            sitemap: Arc::new(SitemapBuilder::new(
                &config.site_base_url,
                Arc::clone(&registry),
            )),
            content: Arc::new(content),
            messages: Arc::new(messages),
            registry,
        })
    }

    fn locale(&self, code: &str) -> Result<Locale, ApiError> {
        self.registry.resolve(code).map_err(|e| {
            warn!("Rejected request: {}", e);
            ApiError::NotFound(
                self.messages
                    .get(self.registry.default_locale())
                    .not_found
                    .to_string(),
            )
        })
    }
}

/// Errors returned to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };
        let body = serde_json::json!({ "ok": false, "error": message });
        (status, Json(body)).into_response()
    }
}

/// A fetched record together with the metadata to render it with.
#[derive(Debug, Serialize)]
pub struct ContentResponse<T> {
    pub content: Record<T>,
    pub metadata: PageMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<Record<BlogPost>>,
    pub pagination: PageInfo,
    pub page_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub metadata: PageMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap))
        .route("/health", get(health))
        .route("/api/:locale/pages/:slug", get(page))
        .route("/api/:locale/posts", get(posts))
        .route("/api/:locale/posts/:slug", get(post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn sitemap(State(state): State<AppState>) -> Response {
    let slugs = state.content.get_all_page_slugs().await;
    if slugs.is_degraded() {
        warn!("Building sitemap without landing page slugs");
    }

    let xml = state.sitemap.build(&slugs.value);
    (
        [
            (header::CONTENT_TYPE, SITEMAP_CONTENT_TYPE),
            (header::CACHE_CONTROL, SITEMAP_CACHE_CONTROL),
        ],
        xml,
    )
        .into_response()
}

async fn health(State(state): State<AppState>) -> Response {
    Json(serde_json::json!({
        "ok": true,
        "content": state.content.metrics().report(),
    }))
    .into_response()
}

async fn page(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<ContentResponse<LandingPage>>, ApiError> {
    let locale = state.locale(&locale)?;
    let not_found = || ApiError::NotFound(state.messages.get(locale).not_found.to_string());

    if !is_routable_slug(&slug) {
        return Err(not_found());
    }

    let page = state
        .content
        .get_page_by_slug(&slug, locale)
        .await
        .into_value()
        .ok_or_else(not_found)?;

    let fields = MetadataFields::new(locale)
        .title(page.fields.title.clone())
        .description(page.fields.meta_description.clone())
        .slug(slug)
        .preview_image(
            page.fields
                .featured_image
                .as_ref()
                .and_then(|image| image.absolute_url(state.content.base_url())),
        );

    Ok(Json(ContentResponse {
        metadata: state.metadata.build(&fields),
        content: page,
    }))
}

async fn post(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<ContentResponse<BlogPost>>, ApiError> {
    let locale = state.locale(&locale)?;
    let not_found = || ApiError::NotFound(state.messages.get(locale).not_found.to_string());

    if !is_routable_slug(&slug) {
        return Err(not_found());
    }

    let post = state
        .content
        .get_post_by_slug(&slug, locale)
        .await
        .into_value()
        .ok_or_else(not_found)?;

    let published = post
        .fields
        .publish_date
        .clone()
        .or_else(|| post.published_at.map(|t| t.to_rfc3339()));
    let modified = post.updated_at.map(|t| t.to_rfc3339());

    let fields = MetadataFields::new(locale)
        .title(post.fields.title.clone())
        .description(
            post.fields
                .meta_description
                .clone()
                .or_else(|| post.fields.excerpt.clone()),
        )
        .slug(format!("blog/{}", slug))
        .preview_image(
            post.fields
                .featured_image
                .as_ref()
                .and_then(|image| image.absolute_url(state.content.base_url())),
        )
        .article(published, modified);

    Ok(Json(ContentResponse {
        metadata: state.metadata.build(&fields),
        content: post,
    }))
}

async fn posts(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let locale = state.locale(&locale)?;
    let messages = state.messages.get(locale);

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let listing = state
        .content
        .get_all_posts(locale, page, page_size)
        .await
        .into_value();

    let metadata = state.metadata.build(
        &MetadataFields::new(locale)
            .title(messages.blog_title)
            .description(Some(messages.blog_description))
            .slug("blog"),
    );

    Ok(Json(PostListResponse {
        page_label: messages.page_label(listing.pagination.page, listing.pagination.page_count),
        empty_message: listing
            .posts
            .is_empty()
            .then(|| messages.blog_empty.to_string()),
        posts: listing.posts,
        pagination: listing.pagination,
        metadata,
    }))
}
