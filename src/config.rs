use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Content API (Strapi)
    pub content_api_url: String,
    pub content_api_token: String,
    pub revalidate_secs: u64,

    // Public site
    pub site_base_url: String,

    // HTTP server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let content_api_url = trim_base_url(
            std::env::var("STRAPI_API_URL")
                .unwrap_or_else(|_| "http://localhost:1337".to_string()),
        );
        reqwest::Url::parse(&content_api_url)
            .with_context(|| format!("STRAPI_API_URL is not a valid URL: {}", content_api_url))?;

        let site_base_url = trim_base_url(
            std::env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "https://superduperai.co".to_string()),
        );
        reqwest::Url::parse(&site_base_url)
            .with_context(|| format!("SITE_BASE_URL is not a valid URL: {}", site_base_url))?;

        Ok(Self {
            content_api_url,
            // An empty token is sent as-is; public Strapi collections accept it
            content_api_token: std::env::var("STRAPI_API_TOKEN").unwrap_or_default(),
            revalidate_secs: std::env::var("CONTENT_REVALIDATE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),

            site_base_url,

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    /// Response-reuse window advertised to the transport layer.
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "STRAPI_API_URL",
        "STRAPI_API_TOKEN",
        "SITE_BASE_URL",
        "CONTENT_REVALIDATE_SECS",
        "PORT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_fallbacks() {
        clear_env();

        let config = Config::from_env().expect("fallbacks should load");
        assert_eq!(config.content_api_url, "http://localhost:1337");
        assert_eq!(config.content_api_token, "");
        assert_eq!(config.site_base_url, "https://superduperai.co");
        assert_eq!(config.revalidate_secs, 3600);
        assert_eq!(config.port, 8080);
        assert_eq!(config.revalidate(), Duration::from_secs(3600));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides_and_trims_slashes() {
        clear_env();
        std::env::set_var("STRAPI_API_URL", "https://cms.example.com/");
        std::env::set_var("STRAPI_API_TOKEN", "secret-token");
        std::env::set_var("SITE_BASE_URL", "https://www.example.com//");
        std::env::set_var("CONTENT_REVALIDATE_SECS", "60");
        std::env::set_var("PORT", "3000");

        let config = Config::from_env().expect("should load");
        assert_eq!(config.content_api_url, "https://cms.example.com");
        assert_eq!(config.content_api_token, "secret-token");
        assert_eq!(config.site_base_url, "https://www.example.com");
        assert_eq!(config.revalidate_secs, 60);
        assert_eq!(config.port, 3000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_unparseable_numbers_fall_back() {
        clear_env();
        std::env::set_var("CONTENT_REVALIDATE_SECS", "hourly");
        std::env::set_var("PORT", "not-a-port");

        let config = Config::from_env().expect("should load");
        assert_eq!(config.revalidate_secs, 3600);
        assert_eq!(config.port, 8080);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_url() {
        clear_env();
        std::env::set_var("SITE_BASE_URL", "not a url");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("SITE_BASE_URL"));

        clear_env();
    }
}
