//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by the list and calendar views.
//! - Validate user-editable fields at the creation/edit boundary.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `name` is non-empty after trimming.
//! - `start` is strictly earlier than `end`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a task.
///
/// Time-derived at creation (epoch milliseconds, bumped past existing ids
/// on collision). Kept as a type alias to make semantic intent explicit in
/// signatures.
pub type TaskId = i64;

/// Validation failures for user-supplied task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The name is empty or whitespace-only.
    EmptyName,
    /// The time window is reversed or empty.
    InvalidTimeWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::InvalidTimeWindow { start, end } => {
                write!(f, "task end ({end}) must be later than start ({start})")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// User-editable task fields, shared by the add and edit flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub comment: Option<String>,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A single task record.
///
/// Wire field names match the legacy storage payload, so data saved by
/// earlier versions keeps loading unchanged. Timestamps serialize as
/// RFC 3339 instant strings; the UI interprets them in local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(rename = "startDateTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDateTime")]
    pub end: DateTime<Utc>,
    /// Optional free text, rendered as a detail/tooltip line.
    #[serde(default)]
    pub comment: Option<String>,
    /// Set only through explicit toggle/complete actions.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Builds a task from user-supplied fields.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - Returns a validation error instead of a task when any field
    ///   invariant is broken.
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            name: draft.name,
            start: draft.start,
            end: draft.end,
            comment: draft.comment,
            completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks field invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if self.start >= self.end {
            return Err(TaskValidationError::InvalidTimeWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}
