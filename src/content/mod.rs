//! Content resolution: namespace loading, flattening and verification.
//!
//! - `tree`: parsed namespace documents and the leaf coercion policy
//! - `flatten`: dot-path message tables and merge semantics
//! - `loader`: namespace files on disk, prefixes, page tables
//! - `cache`: single-flight cache of parsed namespaces
//! - `manifest`: the locale × namespace manifest and its verification

mod cache;
mod flatten;
mod loader;
mod manifest;
mod tree;

pub use cache::NamespaceCache;
pub use flatten::{flatten, MessageTable, MessageValue};
pub use loader::{
    namespace_prefix, validate_namespace, NamespaceLoader, FAQ_NAMESPACE, MESSAGE_ROOT,
};
pub use manifest::{manifest, manifest_namespaces, verify_manifest, ManifestEntry};
pub use tree::{ContentNode, ContentTree, KEY_SEPARATOR};
