//! Finished/expired classification and remaining-time labels.
//!
//! # Invariants
//! - Minute/hour/day buckets all derive from one remaining-duration value
//!   through ceiling division, so the units can never disagree about the
//!   same task.
//! - The "finished" and "expired" predicates share the past-deadline
//!   clause.

use crate::model::task::Task;
use chrono::{DateTime, Utc};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Display label and urgency flag for a task's remaining time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineInfo {
    pub label: String,
    pub urgent: bool,
}

/// A task is finished when completed, or past its end time.
pub fn is_finished(task: &Task, now: DateTime<Utc>) -> bool {
    task.completed || is_past_deadline(task, now)
}

/// A task renders as expired when past its end time but not completed.
pub fn is_expired(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed && is_past_deadline(task, now)
}

fn is_past_deadline(task: &Task, now: DateTime<Utc>) -> bool {
    task.end < now
}

/// Remaining-time label and urgency for one task.
///
/// Units round up: a deadline one second away still reads "in 1 minute",
/// never "in 0 minutes".
pub fn deadline_info(task: &Task, now: DateTime<Utc>) -> DeadlineInfo {
    if task.completed {
        return DeadlineInfo {
            label: "completed".to_string(),
            urgent: false,
        };
    }

    let remaining_ms = (task.end - now).num_milliseconds();
    if remaining_ms <= 0 {
        return DeadlineInfo {
            label: "expired".to_string(),
            urgent: true,
        };
    }

    let minutes = ceil_div(remaining_ms, MINUTE_MS);
    if minutes <= 60 {
        return DeadlineInfo {
            label: unit_label(minutes, "minute"),
            urgent: true,
        };
    }

    let hours = ceil_div(remaining_ms, HOUR_MS);
    if hours <= 24 {
        return DeadlineInfo {
            label: unit_label(hours, "hour"),
            urgent: hours <= 6,
        };
    }

    let days = ceil_div(remaining_ms, DAY_MS);
    DeadlineInfo {
        label: unit_label(days, "day"),
        urgent: days <= 1,
    }
}

fn unit_label(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("in 1 {unit}")
    } else {
        format!("in {count} {unit}s")
    }
}

// Callers guarantee value > 0.
fn ceil_div(value: i64, unit: i64) -> i64 {
    (value + unit - 1) / unit
}

#[cfg(test)]
mod tests {
    use super::{ceil_div, unit_label, DAY_MS, HOUR_MS, MINUTE_MS};

    #[test]
    fn ceil_div_rounds_up_partial_units() {
        assert_eq!(ceil_div(1, MINUTE_MS), 1);
        assert_eq!(ceil_div(MINUTE_MS, MINUTE_MS), 1);
        assert_eq!(ceil_div(MINUTE_MS + 1, MINUTE_MS), 2);
        assert_eq!(ceil_div(24 * HOUR_MS + 1, DAY_MS), 2);
    }

    #[test]
    fn unit_label_pluralizes() {
        assert_eq!(unit_label(1, "minute"), "in 1 minute");
        assert_eq!(unit_label(2, "hour"), "in 2 hours");
        assert_eq!(unit_label(60, "minute"), "in 60 minutes");
    }
}
