//! Per-locale message bundles.
//!
//! Bundles are compiled in and paired with the registry once at startup, so a
//! registered locale without messages is a startup error rather than a failed
//! request.

use crate::error::{Error, Result};
use crate::i18n::{Locale, LocaleRegistry};
use std::collections::HashMap;

/// Localized site strings used by the content layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBundle {
    /// Title of the blog index page
    pub blog_title: &'static str,

    /// Meta description of the blog index page
    pub blog_description: &'static str,

    /// Shown when the blog listing is empty
    pub blog_empty: &'static str,

    /// Shown for a missing page or post
    pub not_found: &'static str,

    /// Pagination label
    /// Placeholders: {page}, {count}
    pub page_of: &'static str,
}

impl MessageBundle {
    /// Render the pagination label for a page.
    pub fn page_label(&self, page: u32, page_count: u32) -> String {
        self.page_of
            .replace("{page}", &page.to_string())
            .replace("{count}", &page_count.to_string())
    }
}

// ==================== Bundles ====================

pub const ENGLISH_MESSAGES: MessageBundle = MessageBundle {
    blog_title: "Blog",
    blog_description: "Latest news, tutorials and insights about SuperDuperAI",
    blog_empty: "No blog posts found. Check back soon!",
    not_found: "Page not found",
    page_of: "Page {page} of {count}",
};

pub const SPANISH_MESSAGES: MessageBundle = MessageBundle {
    blog_title: "Blog",
    blog_description: "Últimas noticias, tutoriales e ideas sobre SuperDuperAI",
    blog_empty: "No se encontraron artículos. ¡Vuelve pronto!",
    not_found: "Página no encontrada",
    page_of: "Página {page} de {count}",
};

pub const RUSSIAN_MESSAGES: MessageBundle = MessageBundle {
    blog_title: "Блог",
    blog_description: "Новости, руководства и идеи о SuperDuperAI",
    blog_empty: "Статей пока нет. Загляните позже!",
    not_found: "Страница не найдена",
    page_of: "Страница {page} из {count}",
};

/// Compiled-in bundles keyed by locale code.
fn builtin_bundles() -> &'static [(&'static str, &'static MessageBundle)] {
    &[
        ("en", &ENGLISH_MESSAGES),
        ("es", &SPANISH_MESSAGES),
        ("ru", &RUSSIAN_MESSAGES),
    ]
}

/// Message bundles for every registered locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    bundles: HashMap<&'static str, &'static MessageBundle>,
}

impl MessageCatalog {
    /// Pair the built-in bundles with the registry.
    pub fn load(registry: &LocaleRegistry) -> Result<Self> {
        Self::from_bundles(registry, builtin_bundles())
    }

    /// Pair the given bundles with the registry, failing if any registered
    /// locale has no bundle. Bundles for unregistered locales are ignored.
    pub fn from_bundles(
        registry: &LocaleRegistry,
        bundles: &[(&'static str, &'static MessageBundle)],
    ) -> Result<Self> {
        let mut selected = HashMap::new();

        for code in registry.codes() {
            let bundle = bundles
                .iter()
                .find(|(bundle_code, _)| *bundle_code == code)
                .map(|(_, bundle)| *bundle)
                .ok_or_else(|| {
                    Error::Config(format!("no message bundle for locale '{}'", code))
                })?;
            selected.insert(code, bundle);
        }

        Ok(Self { bundles: selected })
    }

    /// Messages for a locale.
    ///
    /// Every `Locale` comes from the registry the catalog was validated
    /// against; a catalog paired with a different registry falls back to the
    /// English bundle.
    pub fn get(&self, locale: Locale) -> &'static MessageBundle {
        self.bundles
            .get(locale.code())
            .copied()
            .unwrap_or(&ENGLISH_MESSAGES)
    }
}
