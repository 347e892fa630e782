//! Static page registry.
//!
//! Lists every page the site renders and the translation namespaces each
//! page loads. Page keys double as site paths (`legal/terms` is served at
//! `/legal/terms`), except for the home page which is served at `/`.

/// Key of the page served at the site root.
pub const HOME_PAGE: &str = "home";

/// Namespace loaded before every page's own namespaces.
pub const COMMON_NAMESPACE: &str = "common";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDefinition {
    pub key: &'static str,
    pub namespaces: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct PageRegistry {
    pages: Vec<PageDefinition>,
}

impl PageRegistry {
    pub fn new(pages: Vec<PageDefinition>) -> Self {
        Self { pages }
    }

    /// The pages of the marketing site.
    pub fn site() -> Self {
        Self::new(vec![
            page(HOME_PAGE, &["home", "faq"]),
            page("strategies", &["strategies", "faq"]),
            page("future-you", &["future-you"]),
            page("waitlist", &["waitlist"]),
            page("help/contact", &["help/contact"]),
            page("help/faq", &["faq"]),
            page("legal/terms", &["legal/terms"]),
            page("legal/privacy", &["legal/privacy"]),
        ])
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pages.iter().map(|p| p.key)
    }

    pub fn pages(&self) -> &[PageDefinition] {
        &self.pages
    }

    pub fn get(&self, key: &str) -> Option<&PageDefinition> {
        self.pages.iter().find(|p| p.key == key)
    }

    /// Namespaces to load for a page, in merge order: the common namespace
    /// first, then the page's own.
    pub fn namespaces_for(&self, key: &str) -> Option<Vec<&'static str>> {
        self.get(key).map(|page| {
            std::iter::once(COMMON_NAMESPACE)
                .chain(page.namespaces.iter().copied())
                .collect()
        })
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::site()
    }
}

fn page(key: &'static str, namespaces: &'static [&'static str]) -> PageDefinition {
    PageDefinition { key, namespaces }
}
