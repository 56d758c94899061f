//! Explicit demo data initializer.
//!
//! Seeding only runs against an empty store and never happens implicitly.

use crate::model::note::{EpochMillis, Note};
use crate::store::id::new_note_id;
use crate::store::{MemoryStore, TagRepository};
use log::info;

const MINUTE_MS: EpochMillis = 60 * 1000;
const HOUR_MS: EpochMillis = 60 * MINUTE_MS;
const DAY_MS: EpochMillis = 24 * HOUR_MS;

const WORK_COLOR: &str = "#2563EB";
const IDEAS_COLOR: &str = "#F59E0B";

const WELCOME_CONTENT: &str = "This is your personal notes app. Select a note, or create a new one.\n\n- Modern Ocean Professional theme\n- Blue & amber accents\n- Clean, minimalist UI";
const TASKS_CONTENT: &str = "1. Draft proposal\n2. Review design\n3. Sync with team";

/// Populates an empty store with two tags and two backdated notes.
///
/// Returns `false` without touching anything when the store already holds
/// notes or tags.
pub fn seed_demo(store: &mut MemoryStore) -> bool {
    if !store.is_empty() {
        info!(
            "event=store_seed module=store status=skipped notes={} tags={}",
            store.notes.len(),
            store.tags.len()
        );
        return false;
    }

    let work = store.tags.upsert_tag("Work", Some(WORK_COLOR));
    let ideas = store.tags.upsert_tag("Ideas", Some(IDEAS_COLOR));

    let now = store.notes.now();
    store.notes.insert_existing(Note {
        id: new_note_id(),
        title: "Welcome to Ocean Notes".to_string(),
        content: WELCOME_CONTENT.to_string(),
        tags: vec![ideas.id],
        created_at: now - DAY_MS,
        updated_at: now - 30 * MINUTE_MS,
    });
    store.notes.insert_existing(Note {
        id: new_note_id(),
        title: "Tasks".to_string(),
        content: TASKS_CONTENT.to_string(),
        tags: vec![work.id],
        created_at: now - HOUR_MS,
        updated_at: now - 5 * MINUTE_MS,
    });

    info!(
        "event=store_seed module=store status=ok notes={} tags={}",
        store.notes.len(),
        store.tags.len()
    );
    true
}
