//! Calendar date membership and month grid derivation.
//!
//! Date membership works on local calendar dates. Deriving the date from a
//! UTC-normalized string shifts tasks across midnight for anyone not at
//! UTC+0, so every conversion here is explicit about the target time zone
//! (generic over [`chrono::TimeZone`], which also makes the boundary
//! behavior testable with fixed offsets).

use crate::model::task::{Task, TaskId};
use crate::view::deadline::is_expired;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// The month grid is always 6 weeks of 7 days, like a paper calendar.
const GRID_DAYS: i64 = 42;

/// Calendar date of `instant` as observed in `tz`.
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// A task occupies every local calendar date from its start date through
/// its end date, inclusive.
pub fn occurs_on<Tz: TimeZone>(task: &Task, date: NaiveDate, tz: &Tz) -> bool {
    local_date(task.start, tz) <= date && date <= local_date(task.end, tz)
}

/// Tasks whose span covers `date` in `tz`.
pub fn tasks_on_date<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| occurs_on(task, date, tz))
        .collect()
}

/// One rendered task inside a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
    pub expired: bool,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days padding the grid.
    pub in_month: bool,
    pub today: bool,
    pub entries: Vec<CalendarEntry>,
}

/// Month grid render input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

/// Derives the month grid containing `anchor`: 42 cells starting at the
/// Sunday on or before the first of the month.
pub fn month_view<Tz: TimeZone>(
    tasks: &[Task],
    anchor: NaiveDate,
    tz: &Tz,
    now: DateTime<Utc>,
) -> MonthView {
    // Day 1 exists in every month; the fallback branch is unreachable.
    let first_of_month = anchor.with_day(1).unwrap_or(anchor);
    let lead_days = i64::from(first_of_month.weekday().num_days_from_sunday());
    let grid_start = first_of_month - Duration::days(lead_days);
    let today = local_date(now, tz);

    let cells = (0..GRID_DAYS)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            let entries = tasks_on_date(tasks, date, tz)
                .into_iter()
                .map(|task| CalendarEntry {
                    id: task.id,
                    name: task.name.clone(),
                    completed: task.completed,
                    expired: is_expired(task, now),
                })
                .collect();

            DayCell {
                date,
                in_month: date.month() == anchor.month() && date.year() == anchor.year(),
                today: date == today,
                entries,
            }
        })
        .collect();

    MonthView {
        year: anchor.year(),
        month: anchor.month(),
        cells,
    }
}
