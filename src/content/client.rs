use crate::config::Config;
use crate::content::metrics::ContentMetrics;
use crate::content::types::Envelope;
use crate::error::{Error, Result};
use crate::i18n::{Locale, LocaleRegistry};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Query parameters for a content request. Ordered, so identical requests
/// produce identical URLs.
pub type QueryParams = BTreeMap<String, String>;

/// Build `QueryParams` from string pairs.
pub fn query_params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Client for the headless content API.
#[derive(Debug)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    revalidate: Duration,
    default_locale: Locale,
    metrics: ContentMetrics,
}

impl ContentClient {
    pub fn new(config: &Config, registry: &LocaleRegistry) -> Self {
        Self::with_http(reqwest::Client::new(), config, registry)
    }

    /// Build a client around an existing `reqwest::Client` (shared pools, tests).
    pub fn with_http(http: reqwest::Client, config: &Config, registry: &LocaleRegistry) -> Self {
        Self {
            http,
            base_url: config.content_api_url.trim_end_matches('/').to_string(),
            token: config.content_api_token.clone(),
            revalidate: config.revalidate(),
            default_locale: registry.default_locale(),
            metrics: ContentMetrics::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn metrics(&self) -> &ContentMetrics {
        &self.metrics
    }

    /// Build `{base}/api/{endpoint}?locale={locale}&{params}`.
    pub fn build_url(&self, endpoint: &str, locale: Locale, params: &QueryParams) -> Result<Url> {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            return Err(Error::Config("content endpoint must not be empty".to_string()));
        }

        let mut url = Url::parse(&format!("{}/api/{}", self.base_url, endpoint)).map_err(|e| {
            Error::Config(format!("invalid content API URL '{}': {}", self.base_url, e))
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("locale", locale.code());
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Fetch an endpoint and decode the envelope.
    ///
    /// Non-success statuses fail with `Error::Fetch`, malformed bodies with
    /// `Error::Decode`. Nothing is retried.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        locale: Locale,
        params: &QueryParams,
    ) -> Result<Envelope<T>> {
        let url = self.build_url(endpoint, locale, params)?;
        debug!("Fetching content: {}", url);

        self.metrics.record_request();
        let result = self.send(url).await;
        if let Err(e) = &result {
            self.metrics.record_failure(e);
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            // Reuse hint for caches between us and the content source
            .header(
                "Cache-Control",
                format!("max-age={}", self.revalidate.as_secs()),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Error::Decode)
    }
}
