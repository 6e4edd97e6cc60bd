//! Typed persistent cell over one logical key.
//!
//! # Responsibility
//! - Serialize/deserialize one value under one key.
//! - Recover from corrupt records and failed writes without surfacing
//!   errors to the caller.
//!
//! # Invariants
//! - The fallback factory in [`PersistedCell::read_or`] is evaluated at most
//!   once per call.
//! - A corrupt record is treated as absent and overwritten with the
//!   fallback value.
//! - Malformed external updates never reach subscribers.

use crate::store::backend::StorageBackend;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// One durable typed value under one logical key.
pub struct PersistedCell<T> {
    backend: Arc<dyn StorageBackend>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> PersistedCell<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn StorageBackend>, key: &'static str) -> Self {
        Self {
            backend,
            key,
            _value: PhantomData,
        }
    }

    /// The logical key this cell owns.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Raw persisted record, or `None` when absent or unreadable.
    ///
    /// Load failures are logged and reported as "absent".
    pub fn raw(&self) -> Option<String> {
        match self.backend.load(self.key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=cell_load module=store status=error key={} error={err}",
                    self.key
                );
                None
            }
        }
    }

    /// Reads the stored value, falling back to `fallback()` when the record
    /// is absent or does not deserialize.
    ///
    /// The fallback value is written through so the store converges; a
    /// corrupt record is overwritten rather than left in place.
    pub fn read_or(&self, fallback: impl FnOnce() -> T) -> T {
        let Some(raw) = self.raw() else {
            let value = fallback();
            self.write(&value);
            return value;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=cell_read module=store status=corrupt key={} error={err}",
                    self.key
                );
                let value = fallback();
                self.write(&value);
                value
            }
        }
    }

    /// Serializes and persists `value`, fire-and-forget.
    ///
    /// Serialization and store failures are logged and discarded; in-memory
    /// state stays the source of truth for this context.
    pub fn write(&self, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=cell_write module=store status=error key={} error={err}",
                    self.key
                );
                return;
            }
        };

        if let Err(err) = self.backend.store(self.key, &raw) {
            warn!(
                "event=cell_write module=store status=error key={} error={err}",
                self.key
            );
        }
    }

    /// Registers `on_change` for writes made by another execution context.
    ///
    /// The callback receives the freshly deserialized value; records that do
    /// not deserialize are dropped silently.
    pub fn subscribe(&self, on_change: impl Fn(T) + Send + Sync + 'static)
    where
        T: 'static,
    {
        let key = self.key;
        self.backend.subscribe(
            key,
            Box::new(move |raw| match serde_json::from_str::<T>(raw) {
                Ok(value) => on_change(value),
                Err(_) => {
                    debug!("event=cell_external module=store status=dropped key={key}");
                }
            }),
        );
    }
}
