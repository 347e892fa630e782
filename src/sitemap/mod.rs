//! Sitemap generation.
//!
//! Navigation config and the page registry are reduced to a set of
//! locale-agnostic paths, which are then expanded into one entry per
//! supported locale with alternate-language links.

mod build;
mod enumerate;
mod nav;
mod xml;

pub use build::{
    build_sitemap, locale_url, normalize_url, Alternates, ChangeFrequency, SitemapEntry,
};
pub use enumerate::{enumerate_urls, href_path, normalize_path};
pub use nav::{NavConfig, NavItem};
pub use xml::{escape_xml, render_sitemap_xml};

use crate::i18n::supported_locales;
use crate::pages::PageRegistry;
use chrono::{DateTime, Utc};
use tracing::info;

/// Enumerate paths and build entries for every supported locale.
pub fn generate_sitemap(
    nav: &NavConfig,
    pages: &PageRegistry,
    base_url: &str,
    last_modified: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let paths = enumerate_urls(nav, pages);
    let locales = supported_locales();
    let entries = build_sitemap(&paths, &locales, base_url, last_modified);

    info!(
        "Generated sitemap: {} paths x {} locales = {} entries",
        paths.len(),
        locales.len(),
        entries.len()
    );

    entries
}
