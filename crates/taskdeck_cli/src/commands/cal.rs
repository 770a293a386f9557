//! Month calendar rendering.

use crate::input::parse_month;
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate, Utc};
use taskdeck_core::{DayCell, MonthView, TaskService, TaskStore};

const WEEKDAY_HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa";

pub fn run<S: TaskStore>(service: &TaskService<S>, month: Option<&str>) -> Result<()> {
    let anchor = match month {
        Some(text) => parse_month(text)?,
        None => Local::now().date_naive(),
    };
    let view = service.month_view(anchor, &Local, Utc::now());

    print_grid(&view);
    print_day_entries(&view);
    Ok(())
}

fn print_grid(view: &MonthView) {
    // "August 2026" header from any in-month date.
    let first = NaiveDate::from_ymd_opt(view.year, view.month, 1);
    match first {
        Some(date) => println!("{}", date.format("%B %Y")),
        None => println!("{}-{:02}", view.year, view.month),
    }
    println!("{WEEKDAY_HEADER}");

    for week in view.cells.chunks(7) {
        let line: String = week.iter().map(format_cell).collect();
        println!("{line}");
    }
}

/// 5-column cell: day number, `*` when tasks fall on that day, brackets
/// around today.
fn format_cell(cell: &DayCell) -> String {
    if !cell.in_month {
        return "     ".to_string();
    }
    let mark = if cell.entries.is_empty() { ' ' } else { '*' };
    if cell.today {
        format!("[{:>2}{}]", cell.date.day(), mark)
    } else {
        format!(" {:>2}{} ", cell.date.day(), mark)
    }
}

fn print_day_entries(view: &MonthView) {
    let mut printed_header = false;
    for cell in view.cells.iter().filter(|cell| cell.in_month) {
        if cell.entries.is_empty() {
            continue;
        }
        if !printed_header {
            println!();
            printed_header = true;
        }
        let names: Vec<String> = cell
            .entries
            .iter()
            .map(|entry| {
                let suffix = if entry.completed {
                    " [done]"
                } else if entry.expired {
                    " [expired]"
                } else {
                    ""
                };
                format!("{}{suffix}", entry.name)
            })
            .collect();
        println!("{:>2}: {}", cell.date.day(), names.join(", "));
    }
}
