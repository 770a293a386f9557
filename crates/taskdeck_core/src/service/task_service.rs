//! Task application service.
//!
//! # Responsibility
//! - Own the repository as the single application-state object.
//! - Expose the query/mutation surface presentation layers bind to.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or persistence.
//! - The revision tick changes exactly when the in-memory task list does,
//!   including after a persist failure (the memory copy stays
//!   authoritative until the next successful save).

use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::store::TaskStore;
use crate::view::board::{board_view, partition, BoardView};
use crate::view::calendar::{month_view, tasks_on_date, MonthView};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Application state: the repository plus a change tick for the explicit
/// recompute-then-render contract. Presentation layers re-derive their
/// views whenever `revision` moved, instead of relying on implicit
/// re-render side effects.
pub struct TaskService<S: TaskStore> {
    repo: TaskRepository<S>,
    revision: u64,
}

impl<S: TaskStore> TaskService<S> {
    /// Loads application state from the store.
    pub fn open(store: S) -> RepoResult<Self> {
        Ok(Self {
            repo: TaskRepository::open(store)?,
            revision: 0,
        })
    }

    /// Change tick, bumped on every in-memory state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tasks(&self) -> &[Task] {
        self.repo.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.repo.get(id)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.repo.completed_count()
    }

    /// Board view model for the main screen.
    pub fn board(&self, now: DateTime<Utc>) -> BoardView {
        board_view(self.repo.tasks(), now)
    }

    /// Active tasks, soonest deadline first.
    pub fn active_tasks(&self, now: DateTime<Utc>) -> Vec<Task> {
        partition(self.repo.tasks(), now)
            .0
            .into_iter()
            .cloned()
            .collect()
    }

    /// Finished tasks, most recently ended first.
    pub fn finished_tasks(&self, now: DateTime<Utc>) -> Vec<Task> {
        partition(self.repo.tasks(), now)
            .1
            .into_iter()
            .cloned()
            .collect()
    }

    /// Tasks whose span covers `date` in `tz`.
    pub fn tasks_on_date<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Vec<Task> {
        tasks_on_date(self.repo.tasks(), date, tz)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Month grid view model for the calendar screen.
    pub fn month_view<Tz: TimeZone>(
        &self,
        anchor: NaiveDate,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> MonthView {
        month_view(self.repo.tasks(), anchor, tz, now)
    }

    pub fn add(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> RepoResult<TaskId> {
        let result = self.repo.add(draft, now);
        self.track(result)
    }

    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> RepoResult<()> {
        let result = self.repo.update(id, draft);
        self.track(result)
    }

    pub fn remove(&mut self, id: TaskId) -> RepoResult<Task> {
        let result = self.repo.remove(id);
        self.track(result)
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> RepoResult<bool> {
        let result = self.repo.toggle_completed(id);
        self.track(result)
    }

    /// Removes all finished tasks in one batch.
    pub fn clear_finished(&mut self, now: DateTime<Utc>) -> RepoResult<usize> {
        let result = self.repo.bulk_remove_finished(now);
        self.track(result)
    }

    fn track<T>(&mut self, result: RepoResult<T>) -> RepoResult<T> {
        match &result {
            Ok(_) => self.revision += 1,
            // A failed save still mutated the in-memory list.
            Err(RepoError::Store(_)) => self.revision += 1,
            Err(RepoError::Validation(_)) | Err(RepoError::NotFound(_)) => {}
        }
        result
    }
}
