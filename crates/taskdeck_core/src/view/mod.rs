//! Pure view derivation over the task list.
//!
//! # Responsibility
//! - Compute the list and calendar projections from `(tasks, now)`.
//! - Produce render-ready view models; nothing here mutates or stores
//!   state.
//!
//! # Invariants
//! - Derived classifications (active/finished/expired) are recomputed on
//!   every query, never persisted.

pub mod board;
pub mod calendar;
pub mod deadline;
