//! Navigation menu configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One menu entry. Top-level items usually group `items` and carry no `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavItem {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
            items: Vec::new(),
        }
    }

    pub fn group(label: &str, items: Vec<NavItem>) -> Self {
        Self {
            label: label.to_string(),
            href: None,
            items,
        }
    }
}

/// The site's navigation menus, serialized as a JSON array of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavConfig {
    pub items: Vec<NavItem>,
}

impl NavConfig {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    /// Built-in menu used when no configuration file is provided.
    pub fn site() -> Self {
        Self::new(vec![
            NavItem::group(
                "Products",
                vec![
                    NavItem::link("Strategies", "/strategies"),
                    NavItem::link("Future You", "/future-you"),
                ],
            ),
            NavItem::group(
                "Help",
                vec![
                    NavItem::link("Contact", "/help/contact"),
                    NavItem::link("FAQ", "/help/faq"),
                ],
            ),
            NavItem::group(
                "Legal",
                vec![
                    NavItem::link("Terms", "/legal/terms"),
                    NavItem::link("Privacy", "/legal/privacy"),
                ],
            ),
            NavItem::link("Join the waitlist", "/waitlist"),
        ])
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse navigation config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read navigation config {:?}", path))?;
        Self::from_json_str(&raw)
    }

    /// Every `href` in the menu tree, depth-first.
    pub fn hrefs(&self) -> Vec<&str> {
        fn walk<'a>(items: &'a [NavItem], out: &mut Vec<&'a str>) {
            for item in items {
                if let Some(href) = item.href.as_deref() {
                    out.push(href);
                }
                walk(&item.items, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }
}
