//! In-memory and no-storage backends.
//!
//! # Responsibility
//! - Provide a process-local backend with full subscription support for
//!   tests and ephemeral sessions.
//! - Provide the degraded no-storage backend for contexts without a durable
//!   store (e.g. server-side rendering).
//!
//! # Invariants
//! - [`MemoryBackend::store`] never notifies subscribers; only
//!   [`MemoryBackend::push_external`] does, modelling a foreign writer.
//! - [`NullBackend`] performs no reads and no writes.

use crate::store::backend::{ExternalChange, StorageBackend, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-local backend backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    subscribers: Mutex<Vec<(String, ExternalChange)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a write arriving from another execution context: the raw
    /// record is persisted and every subscriber on `key` is notified.
    pub fn push_external(&self, key: &str, raw: &str) {
        lock(&self.entries).insert(key.to_string(), raw.to_string());
        for (subscribed_key, callback) in lock(&self.subscribers).iter() {
            if subscribed_key == key {
                callback(raw);
            }
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn subscribe(&self, key: &str, callback: ExternalChange) {
        lock(&self.subscribers).push((key.to_string(), callback));
    }
}

/// Backend for contexts without any durable store.
///
/// Every read reports "absent" so callers degrade to their fallback value;
/// writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl StorageBackend for NullBackend {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn store(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
