//! Locale registry: the set of locales the site is published in.
//!
//! The registry is an explicit value built once at startup and shared by
//! reference. It is the only way to obtain a [`Locale`], so every locale that
//! reaches the content client or the builders is known to be supported.

use crate::error::{Error, Result};
use crate::i18n::Locale;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale code as used in URLs and content queries (e.g., "en", "es")
    pub code: &'static str,

    /// Human-readable name in the locale's own language (e.g., "Español")
    pub display_name: &'static str,

    /// Whether this is the default locale (served without a URL prefix)
    pub is_default: bool,
}

/// Ordered, validated set of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry from locale configurations.
    ///
    /// Fails when the list is empty, a code is empty or repeated, or the
    /// number of default locales is not exactly one.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self> {
        if locales.is_empty() {
            return Err(Error::Config("locale registry is empty".to_string()));
        }

        for (i, locale) in locales.iter().enumerate() {
            if locale.code.is_empty() {
                return Err(Error::Config("locale code must not be empty".to_string()));
            }
            if locales[..i].iter().any(|other| other.code == locale.code) {
                return Err(Error::Config(format!(
                    "locale '{}' is registered twice",
                    locale.code
                )));
            }
        }

        let defaults: Vec<usize> = locales
            .iter()
            .enumerate()
            .filter(|(_, locale)| locale.is_default)
            .map(|(i, _)| i)
            .collect();

        match defaults.as_slice() {
            [index] => Ok(Self {
                default_index: *index,
                locales,
            }),
            [] => Err(Error::Config("no default locale registered".to_string())),
            _ => Err(Error::Config(
                "multiple default locales registered".to_string(),
            )),
        }
    }

    /// Resolve a locale code, rejecting anything not in the registry.
    ///
    /// # Arguments
    /// * `code` - Locale code from a URL or caller (e.g., "es")
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered
    /// * `Err(Error::UnsupportedLocale)` otherwise
    pub fn resolve(&self, code: &str) -> Result<Locale> {
        self.get_by_code(code)
            .map(|config| Locale::new(config.code))
            .ok_or_else(|| Error::UnsupportedLocale(code.to_string()))
    }

    /// Get a locale configuration by its code.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "en", "ru")
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not registered
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// The default locale.
    pub fn default_locale(&self) -> Locale {
        Locale::new(self.locales[self.default_index].code)
    }

    /// All supported locales, in registration order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.iter().map(|config| Locale::new(config.code))
    }

    /// All supported locale codes.
    ///
    /// # Returns
    /// A vector of codes in registration order (e.g., `["en", "es", "ru"]`).
    pub fn codes(&self) -> Vec<&'static str> {
        self.locales.iter().map(|config| config.code).collect()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Human-readable name for a locale code.
    ///
    /// # Arguments
    /// * `code` - The locale code to look up
    ///
    /// # Returns
    /// The registered display name, or `code` itself when the locale is unknown.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get_by_code(code)
            .map(|config| config.display_name)
            .unwrap_or(code)
    }

    pub fn is_default(&self, locale: Locale) -> bool {
        locale == self.default_locale()
    }

    /// URL path prefix for a locale.
    ///
    /// # Returns
    /// An empty string for the default locale, `/{code}` for any other.
    pub fn path_prefix(&self, locale: Locale) -> String {
        if self.is_default(locale) {
            String::new()
        } else {
            format!("/{}", locale.code())
        }
    }
}

impl Default for LocaleRegistry {
    /// English (default), Spanish and Russian.
    fn default() -> Self {
        Self {
            locales: default_locales(),
            default_index: 0,
        }
    }
}

/// Locales the site ships with.
pub fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            display_name: "English",
            is_default: true,
        },
        LocaleConfig {
            code: "es",
            display_name: "Español",
            is_default: false,
        },
        LocaleConfig {
            code: "ru",
            display_name: "Русский",
            is_default: false,
        },
    ]
}
