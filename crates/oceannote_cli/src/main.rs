//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `oceannote_core` linkage with a seeded in-memory store.
//! - Keep output line-oriented for quick local sanity checks.
//!
//! Usage: `oceannote [query]`. Set `OCEANNOTE_LOG_DIR` (absolute path) to
//! enable file logging and `OCEANNOTE_LOG_LEVEL` to override the level.

use oceannote_core::{
    core_version, default_log_level, init_logging, MemoryStore, NoteFilter, NoteRepository,
    NoteService, PageQuery,
};
use std::env;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "OCEANNOTE_LOG_DIR";
const LOG_LEVEL_ENV: &str = "OCEANNOTE_LOG_LEVEL";

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var(LOG_DIR_ENV) {
        let level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("oceannote: {err}");
            return ExitCode::FAILURE;
        }
    }

    let query = env::args().nth(1);
    let service = NoteService::new(MemoryStore::with_demo_seed());
    let page = service.load_page(&PageQuery {
        query: query.clone(),
        ..PageQuery::default()
    });
    log::info!(
        "event=cli_list module=cli status=ok notes={} tags={}",
        page.notes.len(),
        page.tags.len()
    );

    println!("oceannote_core version={}", core_version());
    println!(
        "filter query={} matched={}",
        query.as_deref().unwrap_or("-"),
        page.notes.len()
    );
    for note in &page.notes {
        println!(
            "note id={} title={:?} tags={:?}",
            note.id,
            note.title,
            service.tag_names_for(note)
        );
    }
    for tag in &page.tags {
        let count = service
            .store()
            .list_notes(&NoteFilter::tagged(tag.id.as_str()))
            .len();
        println!("tag name={:?} color={} notes={}", tag.name, tag.display_color(), count);
    }

    ExitCode::SUCCESS
}
