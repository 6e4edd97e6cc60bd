//! Persistent key-value cell layer.
//!
//! # Responsibility
//! - Define the injected storage contract (`StorageBackend`).
//! - Provide the typed cell (`PersistedCell`) that serializes one value
//!   under one logical key and recovers from corruption.
//!
//! # Invariants
//! - No storage fault propagates past this layer as an error or panic; the
//!   contract is "always return a usable value".
//! - In-memory state stays authoritative when a durable write fails.

pub mod backend;
pub mod cell;
pub mod memory;
pub mod sqlite;
