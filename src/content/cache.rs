//! Process-wide cache of parsed namespaces.
//!
//! Each `(locale, namespace)` key owns a `OnceLock` slot. Concurrent first
//! lookups of a cold key block on the same slot, so the document is read and
//! parsed once. Content is static for the lifetime of the process, so a
//! missing or malformed document stays cached. Read failures (`Io`) are
//! evicted after the waiting callers see them and the next lookup retries.

use crate::content::tree::ContentTree;
use crate::error::{ContentError, ContentResult};
use crate::i18n::{ContentMetrics, Locale};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

type Slot = Arc<OnceLock<ContentResult<Arc<ContentTree>>>>;

#[derive(Default)]
pub struct NamespaceCache {
    slots: Mutex<HashMap<(Locale, String), Slot>>,
}

impl NamespaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached tree for the key, running `load` on the first lookup.
    pub fn get_or_load<F>(
        &self,
        locale: Locale,
        namespace: &str,
        load: F,
    ) -> ContentResult<Arc<ContentTree>>
    where
        F: FnOnce() -> ContentResult<ContentTree>,
    {
        // The map lock is only held to find the slot, never while loading.
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(
                slots
                    .entry((locale, namespace.to_string()))
                    .or_default(),
            )
        };

        let mut loaded_here = false;
        let result = slot.get_or_init(|| {
            loaded_here = true;
            load().map(Arc::new)
        });

        let metrics = ContentMetrics::global();
        if loaded_here {
            metrics.record_cache_miss();
            debug!("Cached namespace '{}' for {}", namespace, locale);
        } else {
            metrics.record_cache_hit();
        }

        let result = result.clone();
        if let Err(e) = &result {
            if !is_cacheable(e) {
                self.evict(locale, namespace, &slot);
            }
        }
        result
    }

    /// Drop the slot for a key, unless it was already replaced by a retry.
    fn evict(&self, locale: Locale, namespace: &str, slot: &Slot) {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let key = (locale, namespace.to_string());
        if slots.get(&key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            debug!("Evicting failed read of '{}' for {}", namespace, locale);
            slots.remove(&key);
        }
    }

    /// Number of keys that have been requested at least once.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_cacheable(error: &ContentError) -> bool {
    !matches!(error, ContentError::Io { .. })
}
