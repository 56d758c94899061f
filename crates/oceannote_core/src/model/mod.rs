//! Domain model for notes and tags.
//!
//! # Responsibility
//! - Define the records owned by the in-memory store.
//! - Keep normalization rules (titles, tag name keys) next to the data.
//!
//! # Invariants
//! - Every record is identified by a stable opaque string id.
//! - Notes reference tags by id only; there is no ownership between them.

pub mod note;
pub mod tag;
