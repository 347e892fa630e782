//! Error types for the content pipeline.

use thiserror::Error;

/// Errors raised while resolving localized content.
///
/// Only [`ContentError::UnsupportedLocale`] is fatal to a request. Every other
/// variant is recovered by substituting an empty content tree, so a single
/// broken namespace never takes down a whole page.
///
/// Variants carry rendered messages rather than source errors so that results
/// can be cached and shared between requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Unsupported locale: '{0}'")]
    UnsupportedLocale(String),

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Namespace '{namespace}' not found for locale '{locale}'")]
    NamespaceNotFound { locale: String, namespace: String },

    #[error("Malformed content in '{namespace}' ({locale}): {reason}")]
    MalformedContent {
        locale: String,
        namespace: String,
        reason: String,
    },

    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },
}

impl ContentError {
    /// Whether the caller may substitute empty content and keep going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ContentError::UnsupportedLocale(_))
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
