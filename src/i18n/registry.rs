//! Locale registry: Single source of truth for all locales the site serves.
//!
//! The set of locales is closed and fixed at startup. It uses a singleton
//! pattern with `OnceLock` to ensure thread-safe initialization and access.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale code as it appears in route segments (e.g., "en", "pt-BR")
    pub code: &'static str,

    /// English name of the locale (e.g., "Portuguese (Brazil)")
    pub name: &'static str,

    /// Native name of the locale (e.g., "Português (Brasil)")
    pub native_name: &'static str,

    /// Whether this is the default locale (served without a URL prefix).
    /// Exactly one locale must set this.
    pub is_default: bool,

    /// Whether this locale is served at all
    pub enabled: bool,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter. Iteration order
/// is the declaration order, default locale first, and is what sitemap output
/// relies on for stable ordering.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Codes are matched exactly; `pt-br` is not `pt-BR`.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all enabled locales, in registry order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get all locales (including disabled ones).
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if no default locale is found or if several are defined. The
    /// registry is static data, so this is a programming error caught by the
    /// tests below.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Default locale configurations.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "pt-BR",
            name: "Portuguese (Brazil)",
            native_name: "Português (Brasil)",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_portuguese() {
        let registry = LocaleRegistry::get();
        let config = registry.get_by_code("pt-BR").expect("pt-BR registered");

        assert_eq!(config.name, "Portuguese (Brazil)");
        assert_eq!(config.native_name, "Português (Brasil)");
        assert!(!config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        let registry = LocaleRegistry::get();
        assert!(registry.get_by_code("pt-br").is_none());
        assert!(registry.get_by_code("EN").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LocaleRegistry::get();
        assert!(registry.get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_enabled_in_declaration_order() {
        let registry = LocaleRegistry::get();
        let codes: Vec<_> = registry.list_enabled().iter().map(|l| l.code).collect();

        assert_eq!(codes, vec!["en", "pt-BR", "es", "de"]);
    }

    #[test]
    fn test_list_all_matches_enabled() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.list_all().len(), registry.list_enabled().len());
    }

    #[test]
    fn test_exactly_one_default_locale() {
        let registry = LocaleRegistry::get();
        let defaults = registry
            .list_all()
            .into_iter()
            .filter(|l| l.is_default)
            .count();

        assert_eq!(defaults, 1);
        assert_eq!(registry.default_locale().code, "en");
    }

    #[test]
    fn test_is_enabled() {
        let registry = LocaleRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("de"));
        assert!(!registry.is_enabled("fr"));
        assert!(!registry.is_enabled(""));
    }
}
