//! Note page use-case service.
//!
//! # Responsibility
//! - Load the notes page view (filtered list, tags, selected note).
//! - Apply form actions (create/update/delete/select) against the store.
//! - Translate comma-separated tag input into tag ids via upsert.
//!
//! # Invariants
//! - Store absence is translated into [`NoteServiceError`] only for updates;
//!   deleting an unknown note is not an error.
//! - Tag input is split on commas, trimmed and stripped of blanks before
//!   upsert; repeated names map to the same tag id.

use crate::model::note::{Note, NoteDraft, NoteId, NotePatch, UNTITLED};
use crate::model::tag::{Tag, TagId};
use crate::store::{NoteFilter, NoteRepository, TagRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note page actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    /// Update was requested without a note id.
    MissingNoteId,
    /// Target note does not exist.
    NoteNotFound(NoteId),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNoteId => write!(f, "missing note id"),
            Self::NoteNotFound(note_id) => write!(f, "note not found: {note_id}"),
        }
    }
}

impl Error for NoteServiceError {}

/// Raw page request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Active tag id filter.
    pub tag: Option<TagId>,
    /// Search text.
    pub query: Option<String>,
    /// Explicitly selected note.
    pub note_id: Option<NoteId>,
}

/// Notes page view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPage {
    /// Filtered notes, most recently updated first.
    pub notes: Vec<Note>,
    /// All tags sorted by name.
    pub tags: Vec<Tag>,
    pub active_tag_id: Option<TagId>,
    /// Explicit selection, else the first listed note.
    pub selected_note: Option<Note>,
    /// Search text echoed back; empty when absent.
    pub query: String,
}

/// Raw form fields as submitted by the notes page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub intent: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
}

/// Page action decoded from a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    Create {
        title: String,
        content: String,
        /// Comma-separated tag names.
        tags: String,
    },
    Update {
        id: String,
        title: String,
        content: String,
        /// Comma-separated tag names; replaces the whole tag list.
        tags: String,
    },
    Delete {
        id: String,
    },
    Select {
        id: String,
        tag: String,
        query: String,
    },
}

impl NoteAction {
    /// Decodes one action from the `_intent` form field.
    ///
    /// Returns `None` for unknown intents. Missing text fields become empty
    /// strings, except titles which default to [`UNTITLED`].
    pub fn from_form(form: &FormInput) -> Option<Self> {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        let title = form
            .title
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        match form.intent.trim() {
            "create" => Some(Self::Create {
                title,
                content: field(&form.content),
                tags: field(&form.tags),
            }),
            "update" => Some(Self::Update {
                id: field(&form.id),
                title,
                content: field(&form.content),
                tags: field(&form.tags),
            }),
            "delete" => Some(Self::Delete {
                id: field(&form.id),
            }),
            "select" => Some(Self::Select {
                id: field(&form.id),
                tag: field(&form.tag),
                query: field(&form.q),
            }),
            _ => None,
        }
    }
}

/// Where the page should navigate after an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteLocation {
    pub note_id: Option<NoteId>,
    pub tag: Option<TagId>,
    pub query: Option<String>,
}

impl NoteLocation {
    fn note(note_id: impl Into<NoteId>) -> Self {
        Self {
            note_id: Some(note_id.into()),
            ..Self::default()
        }
    }
}

/// Result of applying a page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Redirect(NoteLocation),
    /// Unknown intent; nothing happened.
    Ack,
}

/// Note page service over a store handle.
pub struct NoteService<S> {
    store: S,
}

impl<S: NoteRepository + TagRepository> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Builds the notes page view for the given request parameters.
    pub fn load_page(&self, query: &PageQuery) -> NotesPage {
        let active_tag_id = non_empty(query.tag.as_deref());
        let search = non_empty(query.query.as_deref());
        let filter = NoteFilter {
            tag_id: active_tag_id.clone(),
            query: search.clone(),
        };
        let notes = self.store.list_notes(&filter);
        let selected_note = match non_empty(query.note_id.as_deref()) {
            Some(note_id) => self.store.get_note(&note_id),
            None => notes.first().cloned(),
        };

        NotesPage {
            notes,
            tags: self.store.list_tags(),
            active_tag_id,
            selected_note,
            query: search.unwrap_or_default(),
        }
    }

    /// Applies one decoded page action.
    pub fn apply(&mut self, action: NoteAction) -> Result<ActionOutcome, NoteServiceError> {
        match action {
            NoteAction::Create {
                title,
                content,
                tags,
            } => {
                let tag_ids = self.resolve_tag_input(&tags);
                let note = self.store.create_note(NoteDraft {
                    title: Some(title),
                    content: Some(content),
                    tags: Some(tag_ids),
                });
                info!(
                    "event=note_action module=service action=create status=ok note_id={}",
                    note.id
                );
                Ok(ActionOutcome::Redirect(NoteLocation::note(note.id)))
            }
            NoteAction::Update {
                id,
                title,
                content,
                tags,
            } => {
                if id.is_empty() {
                    warn!("event=note_action module=service action=update status=error error_code=missing_id");
                    return Err(NoteServiceError::MissingNoteId);
                }
                let tag_ids = self.resolve_tag_input(&tags);
                let patch = NotePatch {
                    title: Some(title),
                    content: Some(content),
                    tags: Some(tag_ids),
                };
                match self.store.update_note(&id, patch) {
                    Some(note) => {
                        info!(
                            "event=note_action module=service action=update status=ok note_id={}",
                            note.id
                        );
                        Ok(ActionOutcome::Redirect(NoteLocation::note(note.id)))
                    }
                    None => {
                        warn!(
                            "event=note_action module=service action=update status=error error_code=not_found note_id={id}"
                        );
                        Err(NoteServiceError::NoteNotFound(id))
                    }
                }
            }
            NoteAction::Delete { id } => {
                if !id.is_empty() {
                    let removed = self.store.delete_note(&id);
                    info!(
                        "event=note_action module=service action=delete status=ok note_id={id} removed={removed}"
                    );
                }
                Ok(ActionOutcome::Redirect(NoteLocation::default()))
            }
            NoteAction::Select { id, tag, query } => {
                Ok(ActionOutcome::Redirect(NoteLocation {
                    note_id: non_empty(Some(id.as_str())),
                    tag: non_empty(Some(tag.as_str())),
                    query: non_empty(Some(query.as_str())),
                }))
            }
        }
    }

    /// Decodes and applies a raw form submission.
    pub fn submit(&mut self, form: &FormInput) -> Result<ActionOutcome, NoteServiceError> {
        match NoteAction::from_form(form) {
            Some(action) => self.apply(action),
            None => Ok(ActionOutcome::Ack),
        }
    }

    /// Upserts every name in comma-separated `raw` and returns their ids in
    /// input order.
    pub fn resolve_tag_input(&mut self, raw: &str) -> Vec<TagId> {
        parse_tag_input(raw)
            .iter()
            .map(|name| self.store.upsert_tag(name, None).id)
            .collect()
    }

    /// Joins the names of the note's resolvable tags with `", "`.
    ///
    /// Dangling tag ids are skipped.
    pub fn tag_names_for(&self, note: &Note) -> String {
        note.tags
            .iter()
            .filter_map(|tag_id| self.store.get_tag(tag_id))
            .map(|tag| tag.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Splits comma-separated tag input into trimmed, non-empty names.
pub fn parse_tag_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
