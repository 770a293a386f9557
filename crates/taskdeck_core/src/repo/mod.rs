//! Task repository layer.
//!
//! # Responsibility
//! - Own the canonical in-memory task list.
//! - Gate every mutation behind validation, then persist through the
//!   [`crate::store::TaskStore`] contract.
//!
//! # Invariants
//! - No two tasks share an id.
//! - Validation and lookup failures abort before any in-memory change.

pub mod task_repo;
