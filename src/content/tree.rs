//! Content trees parsed from namespace documents.
//!
//! Leaf policy: strings are kept as-is, numbers and booleans are coerced to
//! their JSON text, arrays must hold only such scalars. `null` anywhere, and
//! objects or arrays nested inside arrays, reject the whole document.
//!
//! Keys must not contain `.`: flattening joins path segments with dots, so a
//! literal `"a.b"` key would land on the same message key as `a` → `b`.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Separator between segments of a flattened message key.
pub const KEY_SEPARATOR: char = '.';

/// One value in a content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
    List(Vec<String>),
    Tree(ContentTree),
}

/// Nested key/value content for one namespace in one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    entries: BTreeMap<String, ContentNode>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a parsed JSON document. The root must be an object.
    pub fn from_json(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Self::from_object(map, ""),
            other => Err(format!(
                "document root must be an object, found {}",
                json_kind(&other)
            )),
        }
    }

    fn from_object(map: Map<String, Value>, path: &str) -> Result<Self, String> {
        let mut entries = BTreeMap::new();

        for (key, value) in map {
            if key.contains(KEY_SEPARATOR) {
                return Err(format!(
                    "key '{}'{} must not contain '{}'",
                    key,
                    if path.is_empty() {
                        String::new()
                    } else {
                        format!(" under '{}'", path)
                    },
                    KEY_SEPARATOR
                ));
            }

            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };

            let node = match value {
                Value::Object(nested) => {
                    ContentNode::Tree(Self::from_object(nested, &child_path)?)
                }
                Value::Array(items) => {
                    let list = items
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| {
                            scalar_text(&item).ok_or_else(|| {
                                format!(
                                    "'{}[{}]' must be a string, number or boolean, found {}",
                                    child_path,
                                    index,
                                    json_kind(&item)
                                )
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    ContentNode::List(list)
                }
                scalar => ContentNode::Text(scalar_text(&scalar).ok_or_else(|| {
                    format!("'{}' must not be {}", child_path, json_kind(&scalar))
                })?),
            };

            entries.insert(key, node);
        }

        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: impl Into<String>, node: ContentNode) {
        self.entries.insert(key.into(), node);
    }

    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.entries.get(key)
    }

    /// Iterate top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContentNode)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-object values at any depth.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                ContentNode::Tree(tree) => tree.leaf_count(),
                ContentNode::Text(_) | ContentNode::List(_) => 1,
            })
            .sum()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
