//! Namespace manifest and content verification.
//!
//! The manifest is every `(locale, namespace)` pair the page registry can ask
//! for. Verifying it up front turns a missing or broken translation file into
//! a startup report instead of a surprise on the first request.

use crate::content::flatten::flatten;
use crate::content::loader::NamespaceLoader;
use crate::i18n::{supported_locales, Locale, ValidationReport};
use crate::pages::{PageRegistry, COMMON_NAMESPACE};
use std::collections::{BTreeSet, HashSet};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub locale: Locale,
    pub namespace: &'static str,
}

/// All namespaces referenced by the registry, sorted and deduplicated.
pub fn manifest_namespaces(pages: &PageRegistry) -> Vec<&'static str> {
    let mut namespaces: BTreeSet<&'static str> = BTreeSet::new();
    namespaces.insert(COMMON_NAMESPACE);
    for page in pages.pages() {
        namespaces.extend(page.namespaces.iter().copied());
    }
    namespaces.into_iter().collect()
}

/// Every `(locale, namespace)` pair, namespaces outer, locales in registry order.
pub fn manifest(pages: &PageRegistry) -> Vec<ManifestEntry> {
    let locales = supported_locales();
    manifest_namespaces(pages)
        .into_iter()
        .flat_map(|namespace| {
            locales
                .iter()
                .map(move |&locale| ManifestEntry { locale, namespace })
        })
        .collect()
}

/// Load every manifest entry and compare key sets against the default locale.
///
/// Unloadable pairs are errors. Keys present in the default locale but
/// missing from another locale are warnings.
pub fn verify_manifest(loader: &NamespaceLoader, pages: &PageRegistry) -> ValidationReport {
    let mut report = ValidationReport::new();
    let default_locale = Locale::default_locale();
    let locales = supported_locales();
    let namespaces = manifest_namespaces(pages);

    for namespace in &namespaces {
        let reference: Option<HashSet<String>> = loader
            .load(default_locale, namespace)
            .ok()
            .map(|tree| flatten(&tree, "").keys().cloned().collect());

        for &locale in &locales {
            let tree = match loader.load(locale, namespace) {
                Ok(tree) => tree,
                Err(e) => {
                    report.errors.push(e.to_string());
                    continue;
                }
            };

            let Some(reference) = reference.as_ref() else {
                continue;
            };
            if locale == default_locale {
                continue;
            }

            let keys: HashSet<String> = flatten(&tree, "").keys().cloned().collect();
            let mut missing: Vec<_> = reference.difference(&keys).cloned().collect();
            if !missing.is_empty() {
                missing.sort();
                report.warnings.push(format!(
                    "'{}' ({}) is missing {} key(s) present in '{}': {}",
                    namespace,
                    locale,
                    missing.len(),
                    default_locale,
                    missing.join(", ")
                ));
            }
        }
    }

    info!(
        "Verified {} namespaces across {} locales: {} errors, {} warnings",
        namespaces.len(),
        locales.len(),
        report.errors.len(),
        report.warnings.len()
    );

    report
}
