//! Core domain logic for Ocean Notes.
//! This crate is the single source of truth for note/tag invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{normalize_title, EpochMillis, Note, NoteDraft, NoteId, NotePatch, UNTITLED};
pub use model::tag::{Tag, TagId, DEFAULT_TAG_COLOR};
pub use service::note_service::{
    parse_tag_input, ActionOutcome, FormInput, NoteAction, NoteLocation, NoteService,
    NoteServiceError, NotesPage, PageQuery,
};
pub use store::seed::seed_demo;
pub use store::{
    Clock, MemoryStore, NoteFilter, NoteRepository, NoteStore, SystemClock, TagRegistry,
    TagRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
