//! Application-state facade consumed by presentation layers.
//!
//! # Responsibility
//! - Orchestrate repository mutations and view queries behind one object.
//! - Keep presentation layers decoupled from storage details.

pub mod task_service;
