//! Localized content resolution and sitemap generation for the marketing site.
//!
//! - [`content`]: loads translation namespaces per locale and flattens them
//!   into dot-path message tables
//! - [`sitemap`]: enumerates navigable paths and expands them into
//!   locale-prefixed sitemap entries
//! - [`server`]: axum routes exposing both

pub mod announce;
pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod pages;
pub mod security;
pub mod server;
pub mod sitemap;
pub mod waitlist;

pub use error::{ContentError, ContentResult};
