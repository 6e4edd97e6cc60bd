//! SQLite-backed durable key-value store.
//!
//! # Responsibility
//! - Persist raw records in the `kv_records` table opened through `db`.
//! - Enforce the per-record size quota of the durable store.
//!
//! # Invariants
//! - Records above [`MAX_VALUE_BYTES`] are rejected, never truncated.
//! - This backend serves one process; the default no-op subscription
//!   applies.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::store::backend::{StorageBackend, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-record size cap in bytes, emulating a quota-limited store.
pub const MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

/// Durable backend over one SQLite connection.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Wraps an already-bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens a database file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens an in-memory database, useful for ephemeral sessions and tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for SqliteBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn()
            .query_row(
                "SELECT value FROM kv_records WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| StoreError::Backend(err.to_string()))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > MAX_VALUE_BYTES {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                attempted_bytes: value.len(),
                limit_bytes: MAX_VALUE_BYTES,
            });
        }

        self.conn()
            .execute(
                "INSERT INTO kv_records (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now') * 1000)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|err| StoreError::Backend(err.to_string()))
    }
}
