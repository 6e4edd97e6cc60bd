use std::collections::HashSet;
use std::sync::Arc;
use ticklist_core::{MemoryBackend, TaskPatch, TodoEngine};
use uuid::Uuid;

fn engine() -> TodoEngine {
    TodoEngine::new(Arc::new(MemoryBackend::new()))
}

#[test]
fn add_creates_a_sanitized_task_with_defaults() {
    let mut engine = engine();

    let id = engine.add("  Buy milk ", Some(" two liters ")).unwrap();

    let task = &engine.todos()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.note.as_deref(), Some("two liters"));
    assert!(!task.completed);
}

#[test]
fn add_with_blank_title_is_a_noop() {
    let mut engine = engine();

    assert!(engine.add("   ", Some("a note")).is_none());
    assert!(engine.add("", None).is_none());
    assert!(engine.add("\u{0007}\u{0008}", None).is_none());
    assert!(engine.todos().is_empty());
}

#[test]
fn update_applies_only_provided_fields() {
    let mut engine = engine();
    let id = engine.add("Buy milk", Some("two liters")).unwrap();

    engine.update(
        id,
        TaskPatch {
            title: Some("Buy oat milk".to_string()),
            note: None,
        },
    );

    let task = &engine.todos()[0];
    assert_eq!(task.title, "Buy oat milk");
    assert_eq!(task.note.as_deref(), Some("two liters"));
}

#[test]
fn update_with_blank_note_clears_it_to_absent() {
    let mut engine = engine();
    let id = engine.add("Buy milk", Some("two liters")).unwrap();

    engine.update(
        id,
        TaskPatch {
            title: None,
            note: Some("   ".to_string()),
        },
    );

    assert_eq!(engine.todos()[0].note, None);
}

#[test]
fn update_with_blank_title_keeps_the_stored_title() {
    let mut engine = engine();
    let id = engine.add("Buy milk", None).unwrap();

    engine.update(
        id,
        TaskPatch {
            title: Some("   ".to_string()),
            note: None,
        },
    );

    assert_eq!(engine.todos()[0].title, "Buy milk");
}

#[test]
fn update_with_unknown_id_is_a_noop() {
    let mut engine = engine();
    engine.add("Buy milk", None).unwrap();
    let before = engine.todos().to_vec();

    engine.update(
        Uuid::new_v4(),
        TaskPatch {
            title: Some("hijacked".to_string()),
            note: Some("hijacked".to_string()),
        },
    );

    assert_eq!(engine.todos(), before.as_slice());
}

#[test]
fn toggle_flips_completion_and_ignores_unknown_ids() {
    let mut engine = engine();
    let id = engine.add("Buy milk", None).unwrap();

    engine.toggle(id);
    assert!(engine.todos()[0].completed);

    engine.toggle(Uuid::new_v4());
    assert!(engine.todos()[0].completed);

    engine.toggle(id);
    assert!(!engine.todos()[0].completed);
}

#[test]
fn delete_removes_the_matching_task_only() {
    let mut engine = engine();
    let keep = engine.add("Keep me", None).unwrap();
    let doomed = engine.add("Drop me", None).unwrap();

    engine.delete(doomed);
    assert_eq!(engine.todos().len(), 1);
    assert_eq!(engine.todos()[0].id, keep);

    engine.delete(Uuid::new_v4());
    assert_eq!(engine.todos().len(), 1);
}

#[test]
fn clear_completed_removes_all_and_only_completed_tasks() {
    let mut engine = engine();
    let done_a = engine.add("done a", None).unwrap();
    let open = engine.add("still open", None).unwrap();
    let done_b = engine.add("done b", None).unwrap();
    engine.toggle(done_a);
    engine.toggle(done_b);

    engine.clear_completed();

    assert_eq!(engine.todos().len(), 1);
    assert_eq!(engine.todos()[0].id, open);
}

#[test]
fn bulk_toggle_then_clear_completed_empties_the_collection() {
    let mut engine = engine();
    engine.add("one", None).unwrap();
    engine.add("two", None).unwrap();
    engine.add("three", None).unwrap();

    engine.bulk_toggle(true);
    assert!(engine.todos().iter().all(|task| task.completed));

    engine.clear_completed();
    assert!(engine.todos().is_empty());
}

#[test]
fn bulk_toggle_false_reopens_every_task() {
    let mut engine = engine();
    let id = engine.add("one", None).unwrap();
    engine.add("two", None).unwrap();
    engine.toggle(id);

    engine.bulk_toggle(false);
    assert!(engine.todos().iter().all(|task| !task.completed));
}

#[test]
fn ids_stay_unique_and_titles_non_empty_across_operation_sequences() {
    let mut engine = engine();
    let a = engine.add("alpha", Some("first")).unwrap();
    let b = engine.add("beta", None).unwrap();
    let c = engine.add("gamma", Some("third")).unwrap();

    engine.toggle(b);
    engine.update(
        a,
        TaskPatch {
            title: Some("  ".to_string()),
            note: Some("kept".to_string()),
        },
    );
    engine.move_up(c);
    engine.move_down(a);
    engine.delete(b);
    engine.add("delta", None).unwrap();

    let ids: HashSet<_> = engine.todos().iter().map(|task| task.id).collect();
    assert_eq!(ids.len(), engine.todos().len());
    assert!(engine
        .todos()
        .iter()
        .all(|task| !task.title.trim().is_empty()));
}

#[test]
fn mutations_refresh_updated_at_but_not_created_at() {
    let mut engine = engine();
    let id = engine.add("Buy milk", None).unwrap();
    let created = engine.todos()[0].created_at.clone();

    engine.toggle(id);

    let task = &engine.todos()[0];
    assert_eq!(task.created_at, created);
    assert!(task.updated_at >= created);
}
