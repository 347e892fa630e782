//! Enumeration of locale-agnostic navigable paths.

use crate::i18n::is_supported_locale;
use crate::pages::{PageRegistry, HOME_PAGE};
use crate::sitemap::nav::NavConfig;
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

/// Origin used to resolve site-relative hrefs. Only the path is kept.
const RELATIVE_BASE: &str = "http://localhost/";

/// Collect every navigable path from the menu and the page registry.
///
/// The result always contains `/`. Hrefs that do not parse are skipped.
pub fn enumerate_urls(nav: &NavConfig, pages: &PageRegistry) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    paths.insert("/".to_string());

    for href in nav.hrefs() {
        match href_path(href) {
            Some(path) if path != "/" => {
                paths.insert(path);
            }
            Some(_) => {}
            None => debug!("Skipping nav href {:?}", href),
        }
    }

    for key in pages.keys().filter(|key| *key != HOME_PAGE) {
        paths.insert(normalize_path(&format!("/{}", key)));
    }

    paths
}

/// Extract the locale-agnostic path of a menu href.
///
/// Hrefs starting with `/` are resolved against a placeholder origin: `/x` is
/// site-relative, `//host/x` is protocol-relative and takes the placeholder
/// scheme. Anything else must be an absolute URL. Query and fragment are dropped, a leading locale segment
/// is stripped. Returns `None` for unparseable or non-hierarchical hrefs
/// (`mailto:`, `tel:`).
pub fn href_path(href: &str) -> Option<String> {
    let href = href.trim();

    let parsed = if href.starts_with('/') {
        Url::parse(RELATIVE_BASE).and_then(|base| base.join(href))
    } else {
        Url::parse(href)
    };

    let url = match parsed {
        Ok(url) if !url.cannot_be_a_base() => url,
        Ok(_) => return None,
        Err(e) => {
            debug!("Unparseable href {:?}: {}", href, e);
            return None;
        }
    };

    Some(strip_locale_segment(&normalize_path(url.path())))
}

/// Collapse repeated slashes, drop the trailing slash, ensure a leading one.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Remove a leading `/<locale>` segment from a normalized path.
fn strip_locale_segment(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    if is_supported_locale(first) {
        format!("/{}", rest)
    } else {
        path.to_string()
    }
}
