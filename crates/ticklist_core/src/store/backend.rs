//! Storage backend contract shared by all durable-store implementations.
//!
//! # Responsibility
//! - Define raw load/store/subscribe semantics over string records.
//! - Keep backend failures typed so the cell layer can absorb them.
//!
//! # Invariants
//! - `subscribe` callbacks fire only for changes made by another execution
//!   context, never for this context's own `store` calls.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Callback invoked with the raw record written by another execution context.
pub type ExternalChange = Box<dyn Fn(&str) + Send + Sync>;

/// Failure of a raw backend operation.
///
/// These never escape the cell layer; they exist so backends can report
/// precisely and the cell can log before discarding.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying store failed (I/O, SQL, lock).
    Backend(String),
    /// Value exceeds the backend's per-record size limit.
    QuotaExceeded {
        key: String,
        attempted_bytes: usize,
        limit_bytes: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
            Self::QuotaExceeded {
                key,
                attempted_bytes,
                limit_bytes,
            } => write!(
                f,
                "record `{key}` of {attempted_bytes} bytes exceeds quota of {limit_bytes} bytes"
            ),
        }
    }
}

impl Error for StoreError {}

/// Durable, synchronous, size-limited string store keyed by logical name.
///
/// Implementations cover one execution context each; cross-context change
/// notification is optional and defaults to a no-op for backends without a
/// second writer (e.g. a single-process SQLite file).
pub trait StorageBackend: Send + Sync {
    /// Loads the raw record under `key`, or `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores the raw record under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Registers for raw-record changes made by another execution context.
    fn subscribe(&self, key: &str, callback: ExternalChange) {
        let _ = (key, callback);
    }
}
