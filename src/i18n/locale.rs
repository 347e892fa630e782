//! Locale type: validated locale representation.
//!
//! A `Locale` can only be constructed from a code that the registry knows and
//! has enabled, so downstream code never re-validates.

use crate::error::{ContentError, ContentResult};
use crate::i18n::{LocaleConfig, LocaleRegistry};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated, supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    /// Create a Locale from a route segment.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered and enabled
    /// * `Err(ContentError::UnsupportedLocale)` otherwise
    pub fn from_code(code: &str) -> ContentResult<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            _ => Err(ContentError::UnsupportedLocale(code.to_string())),
        }
    }

    /// The locale served without a URL prefix.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Never in practice: a `Locale` only exists for registered codes.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }

    /// URL path prefix for this locale: empty for the default locale,
    /// `/<code>` otherwise.
    pub fn url_prefix(&self) -> String {
        if self.is_default() {
            String::new()
        } else {
            format!("/{}", self.code)
        }
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

/// All supported locales, in registry order (default first).
pub fn supported_locales() -> Vec<Locale> {
    LocaleRegistry::get()
        .list_enabled()
        .into_iter()
        .map(|config| Locale { code: config.code })
        .collect()
}

/// Route-guard predicate: whether a path segment names a supported locale.
pub fn is_supported_locale(code: &str) -> bool {
    LocaleRegistry::get().is_enabled(code)
}
