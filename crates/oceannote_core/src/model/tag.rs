//! Tag domain model.
//!
//! # Invariants
//! - Tag names are unique under trim + lowercase within one registry.
//! - Tags are never renamed or deleted once registered.

use serde::{Deserialize, Serialize};

/// Stable identifier for a tag.
pub type TagId = String;

/// Accent used when a tag has no explicit color.
pub const DEFAULT_TAG_COLOR: &str = "#F59E0B";

/// Labeled category referenced by id from notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    /// Trimmed display name. May be empty; no validation is applied.
    pub name: String,
    /// Free-form display hint, e.g. `#2563EB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Tag {
    /// Returns the explicit color or [`DEFAULT_TAG_COLOR`].
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_TAG_COLOR)
    }
}

/// Key used for case-insensitive tag name comparison.
pub fn tag_name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
