//! Domain model for the task collection and its view state.
//!
//! # Responsibility
//! - Define the canonical task record and its persisted wire shape.
//! - Define the completion-state filter and text sanitization rules.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Stored text has passed sanitization before it reaches this model.

pub mod filter;
pub mod sanitize;
pub mod task;
