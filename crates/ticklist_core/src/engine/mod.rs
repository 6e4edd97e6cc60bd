//! Todo state engine.
//!
//! # Responsibility
//! - Own the task collection and filter/search view state.
//! - Orchestrate persistence through the cell layer and expose derived
//!   views to the rendering layer.
//!
//! # Invariants
//! - Every mutation replaces the whole persisted collection in one step.
//! - Storage faults never escape engine APIs; the only user-visible failure
//!   state is the one-shot storage-reset signal.

pub mod todo;
