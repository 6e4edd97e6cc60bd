use std::sync::Arc;
use ticklist_core::store::sqlite::MAX_VALUE_BYTES;
use ticklist_core::{SqliteBackend, StorageBackend, StoreError, TodoEngine};

#[test]
fn store_and_load_round_trip() {
    let backend = SqliteBackend::open_in_memory().unwrap();

    assert_eq!(backend.load("todos:v1").unwrap(), None);

    backend.store("todos:v1", "[]").unwrap();
    assert_eq!(backend.load("todos:v1").unwrap().as_deref(), Some("[]"));

    backend.store("todos:v1", "[{\"x\":1}]").unwrap();
    assert_eq!(
        backend.load("todos:v1").unwrap().as_deref(),
        Some("[{\"x\":1}]")
    );
}

#[test]
fn keys_are_independent_records() {
    let backend = SqliteBackend::open_in_memory().unwrap();

    backend.store("todos:v1", "[]").unwrap();
    backend.store("todos:filter", "\"active\"").unwrap();

    assert_eq!(backend.load("todos:v1").unwrap().as_deref(), Some("[]"));
    assert_eq!(
        backend.load("todos:filter").unwrap().as_deref(),
        Some("\"active\"")
    );
}

#[test]
fn oversized_values_are_rejected_with_quota_exceeded() {
    let backend = SqliteBackend::open_in_memory().unwrap();
    backend.store("todos:v1", "[]").unwrap();

    let oversized = "x".repeat(MAX_VALUE_BYTES + 1);
    let err = backend.store("todos:v1", &oversized).unwrap_err();
    match err {
        StoreError::QuotaExceeded {
            key,
            attempted_bytes,
            limit_bytes,
        } => {
            assert_eq!(key, "todos:v1");
            assert_eq!(attempted_bytes, MAX_VALUE_BYTES + 1);
            assert_eq!(limit_bytes, MAX_VALUE_BYTES);
        }
        other => panic!("unexpected error: {other}"),
    }

    // The previous record stays intact, never truncated.
    assert_eq!(backend.load("todos:v1").unwrap().as_deref(), Some("[]"));
}

#[test]
fn records_survive_a_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticklist.db");

    let backend = SqliteBackend::open(&path).unwrap();
    backend.store("todos:v1", "[1,2,3]").unwrap();
    drop(backend);

    let reopened = SqliteBackend::open(&path).unwrap();
    assert_eq!(
        reopened.load("todos:v1").unwrap().as_deref(),
        Some("[1,2,3]")
    );
}

#[test]
fn engine_state_survives_a_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticklist.db");

    let mut engine = TodoEngine::new(Arc::new(SqliteBackend::open(&path).unwrap()));
    engine.add("durable task", Some("with a note")).unwrap();
    let done = engine.add("finished task", None).unwrap();
    engine.toggle(done);
    drop(engine);

    let mut reopened = TodoEngine::new(Arc::new(SqliteBackend::open(&path).unwrap()));
    assert_eq!(reopened.todos().len(), 2);
    assert_eq!(reopened.todos()[0].title, "finished task");
    assert!(reopened.todos()[0].completed);
    assert_eq!(reopened.todos()[1].note.as_deref(), Some("with a note"));
    assert!(!reopened.take_storage_reset());
}
