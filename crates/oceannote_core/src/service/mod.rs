//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into page-level use-cases.
//! - Keep request/UI layers decoupled from store details.

pub mod note_service;
