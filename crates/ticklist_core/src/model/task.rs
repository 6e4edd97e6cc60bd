//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by engine and storage.
//! - Keep the persisted wire shape stable across versions.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty sanitized text for every constructed task.
//! - `note` is `None` when cleared, never `Some("")`.
//! - `updated_at` is refreshed on every field mutation.

use crate::model::sanitize::{sanitize_note, sanitize_title};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// One user-managed todo item.
///
/// The serialized form is the persisted record under the `todos:v1` key and
/// must round-trip exactly; unknown fields from older or newer writers are
/// tolerated on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID assigned at creation.
    pub id: TaskId,
    /// Non-empty sanitized display text.
    pub title: String,
    /// Optional sanitized detail text; omitted from the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Completion flag, `false` at creation.
    pub completed: bool,
    /// RFC 3339 UTC timestamp, fixed at creation.
    pub created_at: String,
    /// RFC 3339 UTC timestamp, refreshed on every mutation.
    pub updated_at: String,
}

/// Partial update for [`Task`] text fields.
///
/// `None` means "leave the field alone"; a provided note that sanitizes to
/// empty clears the note to absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub note: Option<String>,
}

impl Task {
    /// Creates a task from raw user input.
    ///
    /// Returns `None` when the title sanitizes to empty; the caller must
    /// treat that as a silent no-op, not an error.
    pub fn new(title: &str, note: Option<&str>) -> Option<Self> {
        let title = sanitize_title(title)?;
        let now = now_timestamp();
        Some(Self {
            id: Uuid::new_v4(),
            title,
            note: note.and_then(sanitize_note),
            completed: false,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Refreshes `updated_at` to the current instant.
    pub fn touch(&mut self) {
        self.updated_at = now_timestamp();
    }

    /// Case-insensitive substring match against title and note.
    ///
    /// `needle` must already be lowercased; a task without a note matches on
    /// its title only.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .note
                .as_deref()
                .is_some_and(|note| note.to_lowercase().contains(needle))
    }
}

/// Current instant as a lexicographically sortable RFC 3339 UTC string.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
