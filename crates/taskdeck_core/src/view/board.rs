//! Active/finished board projection.
//!
//! The main screen splits the task list into the active column (soonest
//! deadline first) and the finished column (most recently ended first) and
//! decorates each row with its deadline label.

use crate::model::task::{Task, TaskId};
use crate::view::deadline::{deadline_info, is_expired, is_finished, DeadlineInfo};
use chrono::{DateTime, Utc};

/// Render data for one board row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub comment: Option<String>,
    pub completed: bool,
    /// Past its end time without being completed.
    pub expired: bool,
    pub deadline: DeadlineInfo,
}

/// Render input for the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub active: Vec<TaskCard>,
    pub finished: Vec<TaskCard>,
    pub completed_count: usize,
    pub total: usize,
}

/// Splits tasks into (active ascending by end time, finished descending
/// by end time). Sorts are stable, so equal deadlines keep list order.
pub fn partition(tasks: &[Task], now: DateTime<Utc>) -> (Vec<&Task>, Vec<&Task>) {
    let (mut finished, mut active): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().partition(|task| is_finished(task, now));

    active.sort_by_key(|task| task.end);
    finished.sort_by(|a, b| b.end.cmp(&a.end));
    (active, finished)
}

/// Derives the full board view model for rendering.
pub fn board_view(tasks: &[Task], now: DateTime<Utc>) -> BoardView {
    let (active, finished) = partition(tasks, now);

    BoardView {
        active: active.into_iter().map(|task| card(task, now)).collect(),
        finished: finished.into_iter().map(|task| card(task, now)).collect(),
        completed_count: tasks.iter().filter(|task| task.completed).count(),
        total: tasks.len(),
    }
}

fn card(task: &Task, now: DateTime<Utc>) -> TaskCard {
    TaskCard {
        id: task.id,
        name: task.name.clone(),
        start: task.start,
        end: task.end,
        comment: task.comment.clone(),
        completed: task.completed,
        expired: is_expired(task, now),
        deadline: deadline_info(task, now),
    }
}
