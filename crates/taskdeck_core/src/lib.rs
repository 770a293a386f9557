//! Core domain logic for taskdeck.
//! This crate is the single source of truth for business invariants:
//! the task record, its durable storage, and the pure view derivations
//! (active/finished board, deadline labels, calendar membership) that
//! presentation layers render.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging};
pub use model::task::{Task, TaskDraft, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository};
pub use service::task_service::TaskService;
pub use store::{SqliteTaskStore, StoreError, StoreResult, TaskStore, TASKS_SLOT};
pub use view::board::{board_view, partition, BoardView, TaskCard};
pub use view::calendar::{
    local_date, month_view, occurs_on, tasks_on_date, CalendarEntry, DayCell, MonthView,
};
pub use view::deadline::{deadline_info, is_expired, is_finished, DeadlineInfo};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
