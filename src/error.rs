use thiserror::Error;

/// Errors raised by the content layer.
///
/// The content client surfaces these directly. Accessors catch them and
/// degrade to empty results, keeping the error on the returned `Fetched`.
#[derive(Debug, Error)]
pub enum Error {
    /// The content source answered with a non-success status.
    #[error("Failed to fetch from content API ({status}): {reason}")]
    Fetch { status: u16, reason: String },

    /// The response body was not the expected JSON envelope.
    #[error("Failed to decode content API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request never produced a status (connection refused, TLS, timeout).
    #[error("Content API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A locale code that is not in the registry reached the boundary.
    #[error("Unsupported locale: '{0}'")]
    UnsupportedLocale(String),

    /// Invalid static configuration (registry, message bundles, endpoint, URLs).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short machine-friendly label, used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Fetch { .. } => "fetch",
            Error::Decode(_) => "decode",
            Error::Transport(_) => "transport",
            Error::UnsupportedLocale(_) => "unsupported_locale",
            Error::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
