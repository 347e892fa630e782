//! Flattening content trees into dot-path message tables.

use crate::content::tree::{ContentNode, ContentTree};
use serde::Serialize;
use std::collections::BTreeMap;

/// A message value: a string, or a string array passed through unexpanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageValue {
    Text(String),
    List(Vec<String>),
}

/// Dot-path keyed lookup table handed to the presentation layer.
///
/// Serializes as a flat JSON object of `string | string[]` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageTable {
    entries: BTreeMap<String, MessageValue>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.entries.get(key)
    }

    /// Convenience lookup for string messages.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(MessageValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MessageValue)> {
        self.entries.iter()
    }

    /// Merge `other` into this table. Entries from `other` win.
    ///
    /// Returns the keys where an existing, different value was replaced.
    /// Re-writing an identical value is not reported.
    pub fn merge(&mut self, other: MessageTable) -> Vec<String> {
        let mut overwritten = Vec::new();

        for (key, value) in other.entries {
            if let Some(previous) = self.entries.insert(key.clone(), value) {
                if self.entries.get(&key) != Some(&previous) {
                    overwritten.push(key);
                }
            }
        }

        overwritten
    }
}

/// Flatten a content tree into a message table under `prefix`.
///
/// A leaf at path `a.b` becomes `prefix.a.b`. String arrays stay arrays,
/// keyed at their own path. An empty prefix emits keys starting at the tree's
/// top level.
pub fn flatten(tree: &ContentTree, prefix: &str) -> MessageTable {
    let mut table = MessageTable::new();
    flatten_into(tree, prefix, &mut table.entries);
    table
}

fn flatten_into(tree: &ContentTree, prefix: &str, out: &mut BTreeMap<String, MessageValue>) {
    for (key, node) in tree.iter() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match node {
            ContentNode::Text(text) => {
                out.insert(path, MessageValue::Text(text.clone()));
            }
            ContentNode::List(items) => {
                out.insert(path, MessageValue::List(items.clone()));
            }
            ContentNode::Tree(nested) => flatten_into(nested, &path, out),
        }
    }
}
