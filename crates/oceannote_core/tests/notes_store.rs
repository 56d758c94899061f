use oceannote_core::{
    Clock, MemoryStore, NoteDraft, NoteFilter, NotePatch, NoteRepository, TagRepository, UNTITLED,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Clock that only moves when the test says so.
#[derive(Clone)]
struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    fn at(now: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now)))
    }

    fn advance(&self, millis: i64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[test]
fn create_then_get_returns_equal_note() {
    let mut store = MemoryStore::new();
    let created = store.create_note(
        NoteDraft::titled("Groceries")
            .with_content("milk, eggs")
            .with_tags(vec!["t_food".to_string()]),
    );

    let loaded = store.get_note(&created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.title, "Groceries");
    assert_eq!(loaded.content, "milk, eggs");
    assert_eq!(loaded.tags, vec!["t_food".to_string()]);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn blank_title_is_normalized_on_create_and_update() {
    let mut store = MemoryStore::new();
    let created = store.create_note(NoteDraft::titled("   "));
    assert_eq!(created.title, UNTITLED);

    let renamed = store
        .update_note(&created.id, NotePatch::title("  Plans  "))
        .unwrap();
    assert_eq!(renamed.title, "Plans");

    let blanked = store.update_note(&created.id, NotePatch::title("")).unwrap();
    assert_eq!(blanked.title, UNTITLED);
}

#[test]
fn updated_at_never_precedes_created_at() {
    let clock = ManualClock::at(1_000);
    let mut store = MemoryStore::with_clock(Box::new(clock.clone()));
    let note = store.create_note(NoteDraft::titled("clocked"));
    assert!(note.updated_at >= note.created_at);

    for step in 0..5 {
        if step % 2 == 0 {
            clock.advance(250);
        }
        let updated = store
            .update_note(&note.id, NotePatch::content(format!("rev {step}")))
            .unwrap();
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(updated.created_at, note.created_at);
    }
}

#[test]
fn delete_is_true_once_then_false() {
    let mut store = MemoryStore::new();
    let note = store.create_note(NoteDraft::default());

    assert!(store.delete_note(&note.id));
    assert!(!store.delete_note(&note.id));
    assert!(!store.delete_note(&note.id));
    assert_eq!(store.get_note(&note.id), None);
}

#[test]
fn unknown_ids_signal_absence() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get_note("nonexistent"), None);
    assert_eq!(
        store.update_note("nonexistent", NotePatch::content("x")),
        None
    );
    assert!(!store.delete_note("nonexistent"));
}

#[test]
fn query_filter_matches_title_or_content_case_insensitively() {
    let mut store = MemoryStore::new();
    let t1 = store.upsert_tag("T1", None);
    let t2 = store.upsert_tag("T2", None);
    let n1 = store.create_note(NoteDraft::titled("Alpha").with_tags(vec![t1.id.clone()]));
    let n2 = store.create_note(
        NoteDraft::titled("Beta containing alpha").with_tags(vec![t2.id.clone()]),
    );
    let n3 = store.create_note(NoteDraft::titled("Gamma").with_content("mentions ALPHA here"));
    store.create_note(NoteDraft::titled("Delta"));

    let mut ids: Vec<String> = store
        .list_notes(&NoteFilter::matching("alpha"))
        .into_iter()
        .map(|note| note.id)
        .collect();
    ids.sort();
    let mut expected = vec![n1.id.clone(), n2.id, n3.id];
    expected.sort();
    assert_eq!(ids, expected);

    let tagged = store.list_notes(&NoteFilter::tagged(t1.id.clone()));
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, n1.id);
}

#[test]
fn tag_and_query_filters_combine_with_and() {
    let mut store = MemoryStore::new();
    let work = store.upsert_tag("Work", None);
    let hit = store.create_note(
        NoteDraft::titled("Quarterly report").with_tags(vec![work.id.clone()]),
    );
    store.create_note(NoteDraft::titled("Quarterly taxes"));
    store.create_note(NoteDraft::titled("Standup").with_tags(vec![work.id.clone()]));

    let filter = NoteFilter {
        tag_id: Some(work.id),
        query: Some("QUARTERLY".to_string()),
    };
    let listed = store.list_notes(&filter);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, hit.id);
}

#[test]
fn tag_filter_is_exact_string_match() {
    let mut store = MemoryStore::new();
    store.create_note(NoteDraft::default().with_tags(vec!["t_abc".to_string()]));

    assert_eq!(store.list_notes(&NoteFilter::tagged("t_abc")).len(), 1);
    assert!(store.list_notes(&NoteFilter::tagged("T_ABC")).is_empty());
    assert!(store.list_notes(&NoteFilter::tagged(" t_abc")).is_empty());
}

#[test]
fn listing_puts_most_recently_updated_first() {
    let mut store = MemoryStore::new();
    let n1 = store.create_note(NoteDraft::titled("first"));
    let n2 = store.create_note(NoteDraft::titled("second"));

    let before: Vec<String> = store
        .list_notes(&NoteFilter::default())
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(before, vec![n2.id.clone(), n1.id.clone()]);

    store.update_note(&n1.id, NotePatch::content("edited")).unwrap();

    let after: Vec<String> = store
        .list_notes(&NoteFilter::default())
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(after, vec![n1.id, n2.id]);
}

#[test]
fn partial_update_keeps_other_fields_and_advances_updated_at() {
    let mut store = MemoryStore::with_clock(Box::new(ManualClock::at(5_000)));
    let note = store.create_note(
        NoteDraft::titled("Keep me")
            .with_content("old")
            .with_tags(vec!["t_1".to_string(), "t_1".to_string()]),
    );

    let updated = store
        .update_note(&note.id, NotePatch::content("x"))
        .unwrap();
    assert_eq!(updated.title, "Keep me");
    assert_eq!(updated.content, "x");
    assert_eq!(updated.tags, vec!["t_1".to_string(), "t_1".to_string()]);
    assert!(updated.updated_at > note.updated_at);

    let untouched = store.update_note(&note.id, NotePatch::default()).unwrap();
    assert_eq!(untouched.content, "x");
    assert!(untouched.updated_at > updated.updated_at);
}

#[test]
fn tags_are_stored_verbatim_even_when_dangling() {
    let mut store = MemoryStore::new();
    let real = store.upsert_tag("Real", None);
    let note = store.create_note(
        NoteDraft::default().with_tags(vec![real.id.clone(), "t_missing".to_string()]),
    );
    assert_eq!(note.tags, vec![real.id.clone(), "t_missing".to_string()]);

    let changed = store.prune_dangling_tag_refs();
    assert_eq!(changed, 1);

    let pruned = store.get_note(&note.id).unwrap();
    assert_eq!(pruned.tags, vec![real.id]);
    assert!(pruned.updated_at > note.updated_at);
    assert_eq!(store.prune_dangling_tag_refs(), 0);
}

#[test]
fn store_can_be_shared_across_threads() {
    let clock = ManualClock::at(10_000);
    let shared = Arc::new(Mutex::new(MemoryStore::with_clock(Box::new(clock.clone()))));

    let worker = {
        let shared = Arc::clone(&shared);
        let clock = clock.clone();
        thread::spawn(move || {
            clock.advance(100);
            let mut store = shared.lock().unwrap();
            let tag = store.upsert_tag("Remote", None);
            store
                .create_note(NoteDraft::titled("from worker").with_tags(vec![tag.id]))
                .id
        })
    };
    let note_id = worker.join().unwrap();

    let store = shared.lock().unwrap();
    assert!(!store.is_empty());
    let note = store.get_note(&note_id).unwrap();
    assert_eq!(note.created_at, 10_100);
    assert_eq!(store.tags().len(), 1);
    assert_eq!(store.notes().len(), 1);
}
