//! Sitemap entries: every navigable path in every locale.

use crate::i18n::Locale;
use crate::sitemap::enumerate::normalize_path;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternates {
    /// Locale code → absolute URL of the same page in that locale
    pub languages: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
    pub alternates: Alternates,
}

/// Collapse repeated slashes after the scheme separator and strip one
/// trailing slash. A bare `/` is left alone.
///
/// Idempotent: `normalize_url(&normalize_url(x)) == normalize_url(x)`.
pub fn normalize_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };

    let mut collapsed = String::with_capacity(rest.len());
    let mut previous_slash = false;
    for ch in rest.chars() {
        let is_slash = ch == '/';
        if !(is_slash && previous_slash) {
            collapsed.push(ch);
        }
        previous_slash = is_slash;
    }

    if collapsed.len() > 1 && collapsed.ends_with('/') {
        collapsed.pop();
    }

    match scheme {
        Some(scheme) => format!("{}://{}", scheme, collapsed),
        None => collapsed,
    }
}

/// Absolute, normalized URL of `path` in `locale`.
pub fn locale_url(base_url: &str, locale: Locale, path: &str) -> String {
    normalize_url(&format!("{}{}{}", base_url, locale.url_prefix(), path))
}

/// Build one entry per path per locale.
///
/// Paths are normalized, deduplicated and visited in ascending order,
/// locales in the order given, so output is stable across runs. `/a`, `/a/`
/// and `//a` are the same path.
pub fn build_sitemap<I, S>(
    paths: I,
    locales: &[Locale],
    base_url: &str,
    last_modified: DateTime<Utc>,
) -> Vec<SitemapEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let paths: BTreeSet<String> = paths
        .into_iter()
        .map(|p| normalize_path(p.as_ref()))
        .collect();
    let mut entries = Vec::with_capacity(paths.len() * locales.len());

    for path in &paths {
        let is_root = path == "/";
        let languages: BTreeMap<String, String> = locales
            .iter()
            .map(|locale| (locale.code().to_string(), locale_url(base_url, *locale, path)))
            .collect();

        for locale in locales {
            entries.push(SitemapEntry {
                url: locale_url(base_url, *locale, path),
                last_modified,
                change_frequency: if is_root {
                    ChangeFrequency::Daily
                } else {
                    ChangeFrequency::Weekly
                },
                priority: if is_root { 1.0 } else { 0.8 },
                alternates: Alternates {
                    languages: languages.clone(),
                },
            });
        }
    }

    entries
}
