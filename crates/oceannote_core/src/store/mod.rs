//! In-memory storage for notes and tags.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for notes and tags.
//! - Provide the explicit store object owning both collections.
//!
//! # Invariants
//! - Store operations never fail; absence is reported as `None` / `false`.
//! - State lives only as long as the owning [`MemoryStore`] value.
//! - Notes reference tags by id; the store never enforces referential
//!   integrity unless [`MemoryStore::prune_dangling_tag_refs`] is called.

mod clock;
mod id;
pub mod note_store;
pub mod seed;
pub mod tag_registry;

pub use clock::{Clock, SystemClock};
pub use note_store::{NoteFilter, NoteStore};
pub use tag_registry::TagRegistry;

use crate::model::note::{Note, NoteDraft, NotePatch};
use crate::model::tag::Tag;
use log::info;

/// Repository interface for tag operations.
pub trait TagRepository {
    /// Returns all tags sorted by name.
    fn list_tags(&self) -> Vec<Tag>;
    /// Returns the tag whose trimmed name matches case-insensitively, or
    /// registers a new one.
    fn upsert_tag(&mut self, name: &str, color: Option<&str>) -> Tag;
    /// Gets one tag by id.
    fn get_tag(&self, tag_id: &str) -> Option<Tag>;
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Creates one note and returns it.
    fn create_note(&mut self, draft: NoteDraft) -> Note;
    /// Gets one note by id.
    fn get_note(&self, note_id: &str) -> Option<Note>;
    /// Lists notes matching `filter`, most recently updated first.
    fn list_notes(&self, filter: &NoteFilter) -> Vec<Note>;
    /// Applies `patch` to an existing note. `None` when the id is unknown.
    fn update_note(&mut self, note_id: &str, patch: NotePatch) -> Option<Note>;
    /// Removes one note. Returns whether a removal happened.
    fn delete_note(&mut self, note_id: &str) -> bool;
}

impl<T: TagRepository + ?Sized> TagRepository for &mut T {
    fn list_tags(&self) -> Vec<Tag> {
        (**self).list_tags()
    }

    fn upsert_tag(&mut self, name: &str, color: Option<&str>) -> Tag {
        (**self).upsert_tag(name, color)
    }

    fn get_tag(&self, tag_id: &str) -> Option<Tag> {
        (**self).get_tag(tag_id)
    }
}

impl<T: NoteRepository + ?Sized> NoteRepository for &mut T {
    fn create_note(&mut self, draft: NoteDraft) -> Note {
        (**self).create_note(draft)
    }

    fn get_note(&self, note_id: &str) -> Option<Note> {
        (**self).get_note(note_id)
    }

    fn list_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        (**self).list_notes(filter)
    }

    fn update_note(&mut self, note_id: &str, patch: NotePatch) -> Option<Note> {
        (**self).update_note(note_id, patch)
    }

    fn delete_note(&mut self, note_id: &str) -> bool {
        (**self).delete_note(note_id)
    }
}

/// Process-local store owning one tag registry and one note store.
#[derive(Default)]
pub struct MemoryStore {
    tags: TagRegistry,
    notes: NoteStore,
}

impl MemoryStore {
    /// Creates an empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store stamped by `clock`.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            tags: TagRegistry::new(),
            notes: NoteStore::with_clock(clock),
        }
    }

    /// Creates a store pre-populated by [`seed::seed_demo`].
    pub fn with_demo_seed() -> Self {
        let mut store = Self::new();
        seed::seed_demo(&mut store);
        store
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.notes.is_empty()
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    /// Removes tag ids that do not resolve in the registry from every note.
    ///
    /// Returns how many notes changed. Changed notes get a new `updated_at`.
    pub fn prune_dangling_tag_refs(&mut self) -> usize {
        let tags = &self.tags;
        let changed = self.notes.retain_tag_refs(|tag_id| tags.contains(tag_id));
        info!("event=tag_refs_prune module=store status=ok changed_notes={changed}");
        changed
    }
}

impl TagRepository for MemoryStore {
    fn list_tags(&self) -> Vec<Tag> {
        self.tags.list_tags()
    }

    fn upsert_tag(&mut self, name: &str, color: Option<&str>) -> Tag {
        self.tags.upsert_tag(name, color)
    }

    fn get_tag(&self, tag_id: &str) -> Option<Tag> {
        self.tags.get_tag(tag_id)
    }
}

impl NoteRepository for MemoryStore {
    fn create_note(&mut self, draft: NoteDraft) -> Note {
        self.notes.create_note(draft)
    }

    fn get_note(&self, note_id: &str) -> Option<Note> {
        self.notes.get_note(note_id)
    }

    fn list_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        self.notes.list_notes(filter)
    }

    fn update_note(&mut self, note_id: &str, patch: NotePatch) -> Option<Note> {
        self.notes.update_note(note_id, patch)
    }

    fn delete_note(&mut self, note_id: &str) -> bool {
        self.notes.delete_note(note_id)
    }
}
