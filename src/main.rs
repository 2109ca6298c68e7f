use anyhow::{Context, Result};
use landing_cms::config::Config;
use landing_cms::i18n::LocaleRegistry;
use landing_cms::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("landing_cms=info".parse()?),
        )
        .init();

    info!("Starting landing content service");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Content API: {}", config.content_api_url);
    info!("Public site: {}", config.site_base_url);

    // Locales and their messages are validated once, before serving
    let registry = LocaleRegistry::default();
    info!("Locales: {}", registry.codes().join(", "));
    let state = AppState::new(&config, registry).context("Invalid locale configuration")?;

    server::serve(state, config.port).await
}
