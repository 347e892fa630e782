//! Namespace loading and page message tables.
//!
//! Namespaces live at `<root>/<locale>/<namespace>.json`. A page's message
//! table is built by loading its namespaces in order, flattening each under
//! a prefix derived from the namespace name, and merging. On a key collision
//! the later namespace wins.

use crate::content::cache::NamespaceCache;
use crate::content::flatten::{flatten, MessageTable};
use crate::content::tree::ContentTree;
use crate::error::{ContentError, ContentResult};
use crate::i18n::{ContentMetrics, KeyCollision, Locale, ValidationReport};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Top-level segment of every message key.
pub const MESSAGE_ROOT: &str = "root";

/// Namespace whose keys live under `root.faq` instead of `root.pages.faq`.
pub const FAQ_NAMESPACE: &str = "faq";

/// Derive the message-key prefix for a namespace.
///
/// * `legal/terms` → `root.pages.legal.terms`
/// * `faq` → `root.faq`
/// * `strategies` → `root.pages.strategies`
pub fn namespace_prefix(namespace: &str) -> String {
    if namespace.contains('/') {
        format!("{}.pages.{}", MESSAGE_ROOT, namespace.replace('/', "."))
    } else if namespace == FAQ_NAMESPACE {
        format!("{}.{}", MESSAGE_ROOT, FAQ_NAMESPACE)
    } else {
        format!("{}.pages.{}", MESSAGE_ROOT, namespace)
    }
}

/// Check that a namespace is a safe, relative, slash-delimited name.
pub fn validate_namespace(namespace: &str) -> ContentResult<()> {
    let invalid = |reason: &str| ContentError::InvalidNamespace {
        namespace: namespace.to_string(),
        reason: reason.to_string(),
    };

    if namespace.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if namespace.contains('\\') {
        return Err(invalid("must use '/' as separator"));
    }
    for segment in namespace.split('/') {
        match segment {
            "" => return Err(invalid("contains an empty segment")),
            "." | ".." => return Err(invalid("contains a relative path segment")),
            _ => {}
        }
    }

    Ok(())
}

/// Reads namespace documents from a content directory.
pub struct NamespaceLoader {
    root: PathBuf,
    cache: Option<NamespaceCache>,
}

impl NamespaceLoader {
    /// Loader that reads from disk on every call.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: None,
        }
    }

    /// Loader backed by a single-flight cache of parsed namespaces.
    pub fn with_cache(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Some(NamespaceCache::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Location of a namespace document.
    pub fn namespace_path(&self, locale: Locale, namespace: &str) -> PathBuf {
        self.root
            .join(locale.code())
            .join(format!("{}.json", namespace))
    }

    /// Load one namespace for a locale given as a route segment.
    pub fn load_namespace(&self, locale: &str, namespace: &str) -> ContentResult<Arc<ContentTree>> {
        let locale = Locale::from_code(locale)?;
        self.load(locale, namespace)
    }

    /// Load one namespace for an already validated locale.
    pub fn load(&self, locale: Locale, namespace: &str) -> ContentResult<Arc<ContentTree>> {
        validate_namespace(namespace)?;

        match &self.cache {
            Some(cache) => {
                cache.get_or_load(locale, namespace, || self.read_namespace(locale, namespace))
            }
            None => self.read_namespace(locale, namespace).map(Arc::new),
        }
    }

    fn read_namespace(&self, locale: Locale, namespace: &str) -> ContentResult<ContentTree> {
        let path = self.namespace_path(locale, namespace);
        debug!("Loading namespace file: {:?}", path);
        ContentMetrics::global().record_namespace_load();

        let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ContentError::NamespaceNotFound {
                locale: locale.code().to_string(),
                namespace: namespace.to_string(),
            },
            _ => ContentError::Io {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
            },
        })?;

        let malformed = |reason: String| ContentError::MalformedContent {
            locale: locale.code().to_string(),
            namespace: namespace.to_string(),
            reason,
        };

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
        ContentTree::from_json(value).map_err(malformed)
    }

    /// Build the message table for a page.
    ///
    /// Namespaces are merged in the given order; later namespaces win on key
    /// collisions. Missing or malformed namespaces are logged and skipped.
    /// Only an unsupported locale is returned as an error.
    pub fn load_page_namespaces<S: AsRef<str>>(
        &self,
        locale: &str,
        namespaces: &[S],
    ) -> ContentResult<MessageTable> {
        self.load_page_namespaces_checked(locale, namespaces)
            .map(|(table, _)| table)
    }

    /// Same as [`load_page_namespaces`](Self::load_page_namespaces), also
    /// returning a report of skipped namespaces and key collisions.
    pub fn load_page_namespaces_checked<S: AsRef<str>>(
        &self,
        locale: &str,
        namespaces: &[S],
    ) -> ContentResult<(MessageTable, ValidationReport)> {
        let locale = Locale::from_code(locale)?;
        let metrics = ContentMetrics::global();

        let mut table = MessageTable::new();
        let mut report = ValidationReport::new();
        let mut origins: HashMap<String, String> = HashMap::new();

        for namespace in namespaces {
            let namespace = namespace.as_ref();

            let tree = match self.load(locale, namespace) {
                Ok(tree) => tree,
                Err(e) if e.is_recoverable() => {
                    warn!("Using empty content for '{}' ({}): {}", namespace, locale, e);
                    metrics.record_recovered_failure();
                    report.errors.push(e.to_string());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let flat = flatten(&tree, &namespace_prefix(namespace));
            let keys: Vec<String> = flat.keys().cloned().collect();

            for key in table.merge(flat) {
                let overwritten = origins.get(&key).cloned().unwrap_or_default();
                report.push_collision(KeyCollision {
                    key,
                    overwritten,
                    kept: namespace.to_string(),
                });
            }
            for key in keys {
                origins.insert(key, namespace.to_string());
            }
        }

        Ok((table, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, locale: &str, namespace: &str, body: &str) {
        let path = dir.path().join(locale).join(format!("{}.json", namespace));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    // ==================== Prefix Tests ====================

    #[test]
    fn test_prefix_nested_namespace() {
        assert_eq!(namespace_prefix("legal/terms"), "root.pages.legal.terms");
        assert_eq!(namespace_prefix("help/contact"), "root.pages.help.contact");
    }

    #[test]
    fn test_prefix_faq() {
        assert_eq!(namespace_prefix("faq"), "root.faq");
    }

    #[test]
    fn test_prefix_nested_faq_is_a_page() {
        assert_eq!(namespace_prefix("help/faq"), "root.pages.help.faq");
    }

    #[test]
    fn test_prefix_plain_namespace() {
        assert_eq!(namespace_prefix("strategies"), "root.pages.strategies");
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_namespace_accepts_nested() {
        assert!(validate_namespace("legal/terms").is_ok());
        assert!(validate_namespace("future-you").is_ok());
    }

    #[test]
    fn test_validate_namespace_rejects_traversal() {
        assert!(matches!(
            validate_namespace("../secrets"),
            Err(ContentError::InvalidNamespace { .. })
        ));
        assert!(validate_namespace("legal/../../etc").is_err());
        assert!(validate_namespace("./faq").is_err());
    }

    #[test]
    fn test_validate_namespace_rejects_malformed() {
        assert!(validate_namespace("").is_err());
        assert!(validate_namespace("/faq").is_err());
        assert!(validate_namespace("legal//terms").is_err());
        assert!(validate_namespace("legal\\terms").is_err());
    }

    // ==================== load_namespace Tests ====================

    #[test]
    fn test_load_namespace_reads_locale_directory() {
        let dir = TempDir::new().unwrap();
        write(&dir, "de", "legal/terms", r#"{"title": "AGB"}"#);

        let loader = NamespaceLoader::new(dir.path());
        let tree = loader.load_namespace("de", "legal/terms").unwrap();
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_load_namespace_unsupported_locale() {
        let dir = TempDir::new().unwrap();
        let loader = NamespaceLoader::new(dir.path());

        assert_eq!(
            loader.load_namespace("fr", "faq").unwrap_err(),
            ContentError::UnsupportedLocale("fr".to_string())
        );
    }

    #[test]
    fn test_load_namespace_not_found() {
        let dir = TempDir::new().unwrap();
        let loader = NamespaceLoader::new(dir.path());

        assert!(matches!(
            loader.load_namespace("en", "strategies"),
            Err(ContentError::NamespaceNotFound { .. })
        ));
    }

    #[test]
    fn test_load_namespace_malformed_json() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en", "faq", "{ not json");
        let loader = NamespaceLoader::new(dir.path());

        assert!(matches!(
            loader.load_namespace("en", "faq"),
            Err(ContentError::MalformedContent { .. })
        ));
    }

    #[test]
    fn test_load_namespace_rejected_leaf() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en", "faq", r#"{"q": null}"#);
        let loader = NamespaceLoader::new(dir.path());

        match loader.load_namespace("en", "faq") {
            Err(ContentError::MalformedContent { reason, .. }) => assert!(reason.contains("q")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_namespace_traversal_never_touches_disk() {
        let dir = TempDir::new().unwrap();
        let loader = NamespaceLoader::new(dir.path().join("messages"));
        fs::write(dir.path().join("secret.json"), r#"{"k": "v"}"#).unwrap();

        assert!(matches!(
            loader.load_namespace("en", "../secret"),
            Err(ContentError::InvalidNamespace { .. })
        ));
    }

    #[test]
    fn test_cached_loader_returns_same_tree() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en", "faq", r#"{"q": "a"}"#);
        let loader = NamespaceLoader::with_cache(dir.path());

        let first = loader.load_namespace("en", "faq").unwrap();
        fs::remove_file(dir.path().join("en").join("faq.json")).unwrap();
        let second = loader.load_namespace("en", "faq").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    // ==================== load_page_namespaces Tests ====================

    #[test]
    fn test_page_namespaces_prefixed_and_merged() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en", "strategies", r#"{"title": "Strategies"}"#);
        write(&dir, "en", "faq", r#"{"items": {"fees": "No fees"}}"#);
        write(&dir, "en", "legal/terms", r#"{"title": "Terms"}"#);

        let loader = NamespaceLoader::new(dir.path());
        let table = loader
            .load_page_namespaces("en", &["strategies", "faq", "legal/terms"])
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.text("root.pages.strategies.title"), Some("Strategies"));
        assert_eq!(table.text("root.faq.items.fees"), Some("No fees"));
        assert_eq!(table.text("root.pages.legal.terms.title"), Some("Terms"));
    }

    #[test]
    fn test_page_namespaces_missing_namespace_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "es", "faq", r#"{"q": "¿Qué?"}"#);

        let loader = NamespaceLoader::new(dir.path());
        let (table, report) = loader
            .load_page_namespaces_checked("es", &["strategies", "faq"])
            .unwrap();

        assert_eq!(table.text("root.faq.q"), Some("¿Qué?"));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("strategies"));
    }

    #[test]
    fn test_page_namespaces_unsupported_locale_is_fatal() {
        let dir = TempDir::new().unwrap();
        let loader = NamespaceLoader::new(dir.path());

        assert!(matches!(
            loader.load_page_namespaces("xx", &["faq"]),
            Err(ContentError::UnsupportedLocale(_))
        ));
    }

    #[test]
    fn test_page_namespaces_empty_list() {
        let dir = TempDir::new().unwrap();
        let loader = NamespaceLoader::new(dir.path());
        let empty: [&str; 0] = [];

        assert!(loader.load_page_namespaces("en", &empty).unwrap().is_empty());
    }

    #[test]
    fn test_page_namespaces_collision_reported_with_origins() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en", "legal", r#"{"terms": {"title": "Legal hub terms"}}"#);
        write(&dir, "en", "legal/terms", r#"{"title": "Terms of Service"}"#);

        let loader = NamespaceLoader::new(dir.path());
        let (table, report) = loader
            .load_page_namespaces_checked("en", &["legal", "legal/terms"])
            .unwrap();

        assert_eq!(
            table.text("root.pages.legal.terms.title"),
            Some("Terms of Service")
        );
        assert_eq!(
            report.collisions,
            vec![KeyCollision {
                key: "root.pages.legal.terms.title".to_string(),
                overwritten: "legal".to_string(),
                kept: "legal/terms".to_string(),
            }]
        );
    }

    #[test]
    fn test_page_namespaces_dotted_key_is_reported_not_masked() {
        let dir = TempDir::new().unwrap();
        write(&dir, "en", "common", r#"{"cta": "Start"}"#);
        write(&dir, "en", "x", r#"{"hero.title": "A", "hero": {"title": "B"}}"#);

        let loader = NamespaceLoader::new(dir.path());
        let (table, report) = loader
            .load_page_namespaces_checked("en", &["common", "x"])
            .unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.text("root.pages.x.hero.title").is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("hero.title"));
    }
}
