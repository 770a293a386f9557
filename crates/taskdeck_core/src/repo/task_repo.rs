//! Task repository: CRUD over the in-memory task list with
//! persist-on-mutation semantics.
//!
//! # Responsibility
//! - Provide the mutation contract (add/update/remove/toggle/bulk-remove).
//! - Persist the whole list after every successful in-memory change.
//!
//! # Invariants
//! - Ids are unique and time-derived; a same-millisecond collision bumps
//!   past the highest existing id.
//! - Validation and not-found failures leave the list untouched.
//! - A failed persist keeps the in-memory change; the next successful
//!   save writes the reconciled state.

use crate::model::task::{Task, TaskDraft, TaskId, TaskValidationError};
use crate::store::{StoreError, TaskStore};
use crate::view::deadline::is_finished;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task mutations and loading.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Store(StoreError),
    NotFound(TaskId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// The in-memory task list plus its backing store.
pub struct TaskRepository<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> TaskRepository<S> {
    /// Loads the stored task list.
    pub fn open(store: S) -> RepoResult<Self> {
        let tasks = store.load()?;
        Ok(Self { store, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks explicitly marked completed. Drives the
    /// "N/M tasks completed" status line.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Validates the draft, assigns a fresh id, appends and persists.
    pub fn add(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> RepoResult<TaskId> {
        let id = self.next_id(now);
        let task = Task::from_draft(id, draft)?;
        self.tasks.push(task);
        log::debug!("event=task_add module=repo status=ok id={id}");
        self.persist()?;
        Ok(id)
    }

    /// Replaces the editable fields of an existing task, preserving its
    /// completion flag.
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> RepoResult<()> {
        let index = self.index_of(id).ok_or(RepoError::NotFound(id))?;

        let mut updated = self.tasks[index].clone();
        updated.name = draft.name;
        updated.start = draft.start;
        updated.end = draft.end;
        updated.comment = draft.comment;
        updated.validate()?;

        self.tasks[index] = updated;
        log::debug!("event=task_update module=repo status=ok id={id}");
        self.persist()
    }

    /// Removes one task and returns it.
    ///
    /// Removal is strict: a missing id is an error, so double deletion
    /// surfaces instead of silently passing.
    pub fn remove(&mut self, id: TaskId) -> RepoResult<Task> {
        let index = self.index_of(id).ok_or(RepoError::NotFound(id))?;
        let removed = self.tasks.remove(index);
        log::debug!("event=task_remove module=repo status=ok id={id}");
        self.persist()?;
        Ok(removed)
    }

    /// Flips the completion flag and returns its new value.
    pub fn toggle_completed(&mut self, id: TaskId) -> RepoResult<bool> {
        let index = self.index_of(id).ok_or(RepoError::NotFound(id))?;
        self.tasks[index].toggle_completed();
        let completed = self.tasks[index].completed;
        log::debug!("event=task_toggle module=repo status=ok id={id} completed={completed}");
        self.persist()?;
        Ok(completed)
    }

    /// Removes every finished task (completed, or past its end time at
    /// `now`) and returns how many were removed. The whole batch persists
    /// with a single save.
    pub fn bulk_remove_finished(&mut self, now: DateTime<Utc>) -> RepoResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !is_finished(task, now));
        let removed = before - self.tasks.len();

        if removed == 0 {
            return Ok(0);
        }

        log::info!("event=task_bulk_remove module=repo status=ok removed={removed}");
        self.persist()?;
        Ok(removed)
    }

    fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn next_id(&self, now: DateTime<Utc>) -> TaskId {
        let max_id = self.tasks.iter().map(|task| task.id).max().unwrap_or(0);
        now.timestamp_millis().max(max_id + 1)
    }

    fn persist(&self) -> RepoResult<()> {
        if let Err(err) = self.store.save(&self.tasks) {
            log::warn!("event=task_save module=repo status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }
}
