//! Note domain model.
//!
//! # Responsibility
//! - Define the note record owned by the note store.
//! - Provide title normalization shared by create/update paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at >= created_at`.
//! - `tags` holds tag ids only; they are weak references and may dangle.

use crate::model::tag::TagId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a note.
pub type NoteId = String;

/// Unix epoch milliseconds.
pub type EpochMillis = i64;

/// Title used when a note is created or renamed with a blank title.
pub const UNTITLED: &str = "Untitled";

/// Canonical note record.
///
/// Serialized as a flat camelCase record keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Never blank; falls back to [`UNTITLED`].
    pub title: String,
    pub content: String,
    /// Ordered tag ids. Duplicates are kept as given.
    pub tags: Vec<TagId>,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
}

/// Optional initial fields for note creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagId>>,
}

impl NoteDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Partial replacement for an existing note.
///
/// `None` fields are left untouched; `Some` fields replace the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagId>>,
}

impl NotePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn tags(tags: Vec<TagId>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }
}

/// Normalizes a title candidate.
///
/// Trims surrounding whitespace; blank or missing input yields [`UNTITLED`].
pub fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => UNTITLED.to_string(),
    }
}

impl Note {
    /// Returns whether title or content contains `needle_lower`.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn matches_query(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }

    /// Returns whether the tag id list contains `tag_id` verbatim.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|id| id == tag_id)
    }
}
