//! In-memory note store.
//!
//! # Responsibility
//! - Own every note and its timestamp bookkeeping.
//! - Provide filtered, recency-ordered listing.
//!
//! # Invariants
//! - `created_at` is written once; `updated_at` advances on every mutation.
//! - Listing is always sorted by `updated_at DESC, id ASC`.
//! - Tag ids are stored verbatim and never checked against the registry.

use crate::model::note::{normalize_title, EpochMillis, Note, NoteDraft, NoteId, NotePatch};
use crate::model::tag::TagId;
use crate::store::clock::{Clock, Stamper, SystemClock};
use crate::store::id::new_note_id;
use crate::store::NoteRepository;
use log::debug;
use std::collections::HashMap;

/// Query options for note listing.
///
/// Both filters combine with AND semantics. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Exact tag id the note must reference.
    pub tag_id: Option<TagId>,
    /// Case-insensitive substring over title or content.
    pub query: Option<String>,
}

impl NoteFilter {
    pub fn tagged(tag_id: impl Into<TagId>) -> Self {
        Self {
            tag_id: Some(tag_id.into()),
            query: None,
        }
    }

    pub fn matching(query: impl Into<String>) -> Self {
        Self {
            tag_id: None,
            query: Some(query.into()),
        }
    }

    fn active_tag(&self) -> Option<&str> {
        self.tag_id.as_deref().filter(|value| !value.is_empty())
    }

    fn active_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
    }
}

/// Note store keyed by note id.
pub struct NoteStore {
    notes: HashMap<NoteId, Note>,
    stamper: Stamper,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Builds a store stamping mutations from `clock`.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            notes: HashMap::new(),
            stamper: Stamper::new(clock),
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub(crate) fn now(&self) -> EpochMillis {
        self.stamper.now()
    }

    /// Inserts a fully formed note, keeping its timestamps.
    pub(crate) fn insert_existing(&mut self, note: Note) {
        self.stamper.observe(note.created_at);
        self.stamper.observe(note.updated_at);
        self.notes.insert(note.id.clone(), note);
    }

    /// Drops every tag id rejected by `keep`, returning how many notes changed.
    pub(crate) fn retain_tag_refs(&mut self, keep: impl Fn(&str) -> bool) -> usize {
        let stale: Vec<NoteId> = self
            .notes
            .values()
            .filter(|note| note.tags.iter().any(|tag_id| !keep(tag_id)))
            .map(|note| note.id.clone())
            .collect();

        for note_id in &stale {
            let stamp = self.stamper.next();
            if let Some(note) = self.notes.get_mut(note_id) {
                note.tags.retain(|tag_id| keep(tag_id));
                note.updated_at = stamp;
            }
        }

        stale.len()
    }
}

impl NoteRepository for NoteStore {
    fn create_note(&mut self, draft: NoteDraft) -> Note {
        let now = self.stamper.next();
        let note = Note {
            id: new_note_id(),
            title: normalize_title(draft.title.as_deref()),
            content: draft.content.unwrap_or_default(),
            tags: draft.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.notes.insert(note.id.clone(), note.clone());
        debug!(
            "event=note_create module=store status=ok note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        note
    }

    fn get_note(&self, note_id: &str) -> Option<Note> {
        self.notes.get(note_id).cloned()
    }

    fn list_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        let tag_id = filter.active_tag();
        let query = filter.active_query();

        let mut notes: Vec<Note> = self
            .notes
            .values()
            .filter(|note| tag_id.map_or(true, |id| note.has_tag(id)))
            .filter(|note| query.as_deref().map_or(true, |q| note.matches_query(q)))
            .cloned()
            .collect();
        notes.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        notes
    }

    fn update_note(&mut self, note_id: &str, patch: NotePatch) -> Option<Note> {
        if !self.notes.contains_key(note_id) {
            debug!("event=note_update module=store status=not_found note_id={note_id}");
            return None;
        }

        let stamp = self.stamper.next();
        let note = self.notes.get_mut(note_id)?;
        if let Some(title) = patch.title {
            note.title = normalize_title(Some(title.as_str()));
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(tags) = patch.tags {
            note.tags = tags;
        }
        note.updated_at = stamp;

        debug!(
            "event=note_update module=store status=ok note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Some(note.clone())
    }

    fn delete_note(&mut self, note_id: &str) -> bool {
        let removed = self.notes.remove(note_id).is_some();
        debug!(
            "event=note_delete module=store status={} note_id={note_id}",
            if removed { "ok" } else { "not_found" }
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteFilter, NoteStore};
    use crate::model::note::{NoteDraft, NotePatch, UNTITLED};
    use crate::store::clock::Clock;
    use crate::store::NoteRepository;

    struct Frozen;

    impl Clock for Frozen {
        fn now_ms(&self) -> i64 {
            42
        }
    }

    #[test]
    fn create_applies_defaults() {
        let mut store = NoteStore::new();
        let note = store.create_note(NoteDraft::default());
        assert_eq!(note.title, UNTITLED);
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn empty_filter_values_are_ignored() {
        let mut store = NoteStore::with_clock(Box::new(Frozen));
        store.create_note(NoteDraft::titled("one"));
        store.create_note(NoteDraft::titled("two"));

        let filter = NoteFilter {
            tag_id: Some(String::new()),
            query: Some(String::new()),
        };
        assert_eq!(store.list_notes(&filter).len(), 2);
    }

    #[test]
    fn update_under_frozen_clock_still_moves_forward() {
        let mut store = NoteStore::with_clock(Box::new(Frozen));
        let note = store.create_note(NoteDraft::titled("draft"));
        let updated = store
            .update_note(&note.id, NotePatch::default())
            .expect("note should exist");
        assert!(updated.updated_at > note.updated_at);
        assert_eq!(updated.created_at, note.created_at);
    }

    #[test]
    fn retain_tag_refs_touches_only_affected_notes() {
        let mut store = NoteStore::with_clock(Box::new(Frozen));
        let tagged = store.create_note(
            NoteDraft::titled("tagged").with_tags(vec!["t_keep".into(), "t_gone".into()]),
        );
        let clean = store.create_note(NoteDraft::titled("clean").with_tags(vec!["t_keep".into()]));

        let changed = store.retain_tag_refs(|id| id == "t_keep");
        assert_eq!(changed, 1);

        let tagged_after = store.get_note(&tagged.id).expect("tagged note exists");
        assert_eq!(tagged_after.tags, vec!["t_keep".to_string()]);
        assert!(tagged_after.updated_at > clean.updated_at);
        assert_eq!(store.get_note(&clean.id), Some(clean));
    }
}
