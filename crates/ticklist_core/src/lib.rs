//! Core state engine for the ticklist todo manager.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod store;

pub use engine::todo::{TodoEngine, FILTER_KEY, TODOS_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::Filter;
pub use model::sanitize::{NOTE_MAX_CHARS, TITLE_MAX_CHARS};
pub use model::task::{Task, TaskId, TaskPatch};
pub use store::backend::{StorageBackend, StoreError};
pub use store::cell::PersistedCell;
pub use store::memory::{MemoryBackend, NullBackend};
pub use store::sqlite::SqliteBackend;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
