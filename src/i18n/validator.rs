//! Content validation reports.
//!
//! Used for two checks: key collisions when several namespaces are merged
//! into one message table, and manifest verification against the content
//! directory. Neither check fails a request; the report is logged or printed
//! by the caller.

use serde::Serialize;

/// Two namespaces produced the same flattened key with different values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    /// The flattened key both namespaces wrote
    pub key: String,

    /// Namespace whose value was overwritten
    pub overwritten: String,

    /// Namespace whose value was kept (the later one)
    pub kept: String,
}

/// Validation report containing errors and warnings about content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that leave a page without content (missing or broken files)
    pub errors: Vec<String>,

    /// Authoring issues that do not lose content outright
    pub warnings: Vec<String>,

    /// Key collisions found while merging namespaces
    pub collisions: Vec<KeyCollision>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            collisions: Vec::new(),
        }
    }

    /// Record a collision, also as a human-readable warning.
    pub fn push_collision(&mut self, collision: KeyCollision) {
        self.warnings.push(format!(
            "Key collision on '{}': '{}' overrides '{}'",
            collision.key, collision.kept, collision.overwritten
        ));
        self.collisions.push(collision);
    }

    /// Append everything from another report.
    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.collisions.extend(other.collisions);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
