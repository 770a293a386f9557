//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record used by every other layer.
//! - Enforce field-level invariants before anything is persisted.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `start < end` holds for every task that passes validation.

pub mod task;
