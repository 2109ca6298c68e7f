//! Locale type: a locale code that has been checked against the registry.

use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
///
/// Values are only handed out by [`LocaleRegistry`](crate::i18n::LocaleRegistry),
/// so holding a `Locale` means the code is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Locale code (e.g., "en", "es")
    code: &'static str,
}

impl Locale {
    pub(crate) fn new(code: &'static str) -> Self {
        Self { code }
    }

    /// Get the locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
