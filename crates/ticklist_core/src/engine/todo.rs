//! Task collection engine: CRUD, ordering, bulk operations, derived views.
//!
//! # Responsibility
//! - Enforce task invariants on every mutation path.
//! - Run the startup self-check and raise the one-shot reset signal.
//! - Absorb whole-value external changes (last-write-wins, no merge).
//!
//! # Invariants
//! - Task ids stay unique across the collection at all times.
//! - No stored task ever has an empty or whitespace-only title.
//! - Invalid inputs (empty title, unknown id, boundary reorder) are silent
//!   no-ops, not errors.

use crate::model::filter::Filter;
use crate::model::sanitize::{sanitize_note, sanitize_title};
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::store::backend::StorageBackend;
use crate::store::cell::PersistedCell;
use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Durable key for the ordered task collection.
pub const TODOS_KEY: &str = "todos:v1";
/// Durable key for the completion-state filter.
pub const FILTER_KEY: &str = "todos:filter";

/// Slot where a subscription parks the latest external value until the
/// engine absorbs it on its own thread.
type Inbox<T> = Arc<Mutex<Option<T>>>;

/// Single source of truth for the task collection and its view state.
///
/// All operations are synchronous; each mutation updates the in-memory
/// collection and writes it through the persistent cell in one step.
pub struct TodoEngine {
    todos: Vec<Task>,
    filter: Filter,
    search: String,
    storage_reset: bool,
    todos_cell: PersistedCell<Vec<Task>>,
    filter_cell: PersistedCell<Filter>,
    incoming_todos: Inbox<Vec<Task>>,
    incoming_filter: Inbox<Filter>,
}

impl TodoEngine {
    /// Builds an engine over the injected backend, running the startup
    /// self-check on the persisted collection.
    ///
    /// A `todos:v1` record that exists but does not deserialize resets the
    /// collection to empty, overwrites the record, and raises the one-shot
    /// reset signal. A corrupt filter record falls back to [`Filter::All`]
    /// silently.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let todos_cell: PersistedCell<Vec<Task>> =
            PersistedCell::new(Arc::clone(&backend), TODOS_KEY);
        let filter_cell: PersistedCell<Filter> = PersistedCell::new(backend, FILTER_KEY);

        let mut storage_reset = false;
        let todos = match todos_cell.raw() {
            Some(raw) => serde_json::from_str::<Vec<Task>>(&raw).unwrap_or_else(|err| {
                warn!("event=storage_reset module=engine status=warn key={TODOS_KEY} error={err}");
                storage_reset = true;
                let empty = Vec::new();
                todos_cell.write(&empty);
                empty
            }),
            None => todos_cell.read_or(Vec::new),
        };
        let filter = filter_cell.read_or(Filter::default);

        let incoming_todos: Inbox<Vec<Task>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&incoming_todos);
        todos_cell.subscribe(move |tasks| {
            *lock(&slot) = Some(tasks);
        });

        let incoming_filter: Inbox<Filter> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&incoming_filter);
        filter_cell.subscribe(move |value| {
            *lock(&slot) = Some(value);
        });

        info!(
            "event=engine_init module=engine status=ok count={} filter={} reset={storage_reset}",
            todos.len(),
            filter.as_str()
        );

        Self {
            todos,
            filter,
            search: String::new(),
            storage_reset,
            todos_cell,
            filter_cell,
            incoming_todos,
            incoming_filter,
        }
    }

    // --- collection mutations -------------------------------------------

    /// Adds a task to the front of the collection (newest first).
    ///
    /// A title that sanitizes to empty creates nothing and returns `None`.
    pub fn add(&mut self, title: &str, note: Option<&str>) -> Option<TaskId> {
        let task = Task::new(title, note)?;
        let id = task.id;
        self.todos.insert(0, task);
        self.persist();
        info!(
            "event=task_add module=engine status=ok count={}",
            self.todos.len()
        );
        Some(id)
    }

    /// Applies the provided patch fields to the matching task.
    ///
    /// A patch title that sanitizes to empty leaves the stored title
    /// unchanged; a patch note that sanitizes to empty clears the note.
    /// Unknown ids are a no-op.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) {
        let Some(task) = self.todos.iter_mut().find(|task| task.id == id) else {
            return;
        };

        if let Some(title) = patch.title {
            if let Some(clean) = sanitize_title(&title) {
                task.title = clean;
            }
        }
        if let Some(note) = patch.note {
            task.note = sanitize_note(&note);
        }
        task.touch();
        self.persist();
    }

    /// Flips `completed` on the matching task; unknown ids are a no-op.
    pub fn toggle(&mut self, id: TaskId) {
        let Some(task) = self.todos.iter_mut().find(|task| task.id == id) else {
            return;
        };
        task.completed = !task.completed;
        task.touch();
        self.persist();
    }

    /// Removes the matching task; unknown ids are a no-op.
    pub fn delete(&mut self, id: TaskId) {
        let before = self.todos.len();
        self.todos.retain(|task| task.id != id);
        if self.todos.len() != before {
            self.persist();
        }
    }

    /// Removes every completed task.
    pub fn clear_completed(&mut self) {
        let before = self.todos.len();
        self.todos.retain(|task| !task.completed);
        if self.todos.len() != before {
            self.persist();
            info!(
                "event=clear_completed module=engine status=ok removed={}",
                before - self.todos.len()
            );
        }
    }

    /// Sets `completed` on every task unconditionally.
    pub fn bulk_toggle(&mut self, completed: bool) {
        for task in &mut self.todos {
            task.completed = completed;
            task.touch();
        }
        self.persist();
    }

    /// Swaps the matching task one position earlier.
    ///
    /// The first position and unknown ids are equivalent no-ops.
    pub fn move_up(&mut self, id: TaskId) {
        let Some(index) = self.position(id) else {
            return;
        };
        if index == 0 {
            return;
        }
        self.todos.swap(index, index - 1);
        self.persist();
    }

    /// Swaps the matching task one position later.
    ///
    /// The last position and unknown ids are equivalent no-ops.
    pub fn move_down(&mut self, id: TaskId) {
        let Some(index) = self.position(id) else {
            return;
        };
        if index + 1 >= self.todos.len() {
            return;
        }
        self.todos.swap(index, index + 1);
        self.persist();
    }

    // --- view state ------------------------------------------------------

    /// Sets and persists the completion-state filter.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.filter_cell.write(&filter);
    }

    /// Sets the session-only search term; never persisted.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The full unfiltered collection in display order.
    pub fn todos(&self) -> &[Task] {
        &self.todos
    }

    // --- derived views ---------------------------------------------------

    /// Count of tasks with `completed == false`.
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|task| !task.completed).count()
    }

    /// Collection narrowed by filter, then by the trimmed case-insensitive
    /// search term over title and note. Order is preserved; an empty or
    /// whitespace-only search applies no narrowing.
    pub fn filtered_todos(&self) -> Vec<&Task> {
        let needle = self.search.trim().to_lowercase();
        self.todos
            .iter()
            .filter(|task| self.filter.admits(task))
            .filter(|task| needle.is_empty() || task.matches_search(&needle))
            .collect()
    }

    // --- recovery and external changes -----------------------------------

    /// One-shot storage-reset signal: `true` exactly once after the startup
    /// self-check discarded a corrupt collection record, then clears.
    pub fn take_storage_reset(&mut self) -> bool {
        std::mem::take(&mut self.storage_reset)
    }

    /// Applies values written by another execution context, replacing the
    /// whole collection and/or filter (last-write-wins, no merge).
    ///
    /// Returns whether anything changed, so callers know to re-render.
    pub fn absorb_external_changes(&mut self) -> bool {
        let mut changed = false;
        if let Some(todos) = lock(&self.incoming_todos).take() {
            self.todos = todos;
            changed = true;
        }
        if let Some(filter) = lock(&self.incoming_filter).take() {
            self.filter = filter;
            changed = true;
        }
        if changed {
            info!(
                "event=external_absorb module=engine status=ok count={}",
                self.todos.len()
            );
        }
        changed
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.todos.iter().position(|task| task.id == id)
    }

    fn persist(&self) {
        self.todos_cell.write(&self.todos);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
