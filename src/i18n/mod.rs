//! Internationalization: supported locales and their message bundles.
//!
//! # Architecture
//!
//! - `registry`: The set of supported locales, the default, and display names
//! - `locale`: A locale code validated against the registry
//! - `messages`: Compiled-in message bundles, checked against the registry at startup
//!
//! # Example
//!
//! ```rust,ignore
//! use landing_cms::i18n::{LocaleRegistry, MessageCatalog};
//!
//! let registry = LocaleRegistry::default();
//! let messages = MessageCatalog::load(&registry)?;
//!
//! let spanish = registry.resolve("es")?;
//! let title = messages.get(spanish).blog_title;
//! ```

mod locale;
mod messages;
mod registry;

pub use locale::Locale;
pub use messages::{MessageBundle, MessageCatalog};
pub use registry::{default_locales, LocaleConfig, LocaleRegistry};
