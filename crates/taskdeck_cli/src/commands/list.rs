//! Board rendering: active and finished task lists.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use taskdeck_core::{TaskCard, TaskService, TaskStore};

pub fn run<S: TaskStore>(service: &TaskService<S>) -> Result<()> {
    let board = service.board(Utc::now());

    if board.total == 0 {
        println!("no tasks yet; add one with `taskdeck add`");
        return Ok(());
    }

    if !board.active.is_empty() {
        println!("Active");
        for card in &board.active {
            print_card(card);
        }
    }

    if !board.finished.is_empty() {
        if !board.active.is_empty() {
            println!();
        }
        println!("Finished");
        for card in &board.finished {
            print_card(card);
        }
    }

    println!();
    println!("{}/{} tasks completed", board.completed_count, board.total);
    Ok(())
}

fn print_card(card: &TaskCard) {
    let marker = if card.completed { "[x]" } else { "[ ]" };
    let urgency = if card.deadline.urgent { " (!)" } else { "" };
    println!(
        "  {marker} #{id}  {name}  {period}  {label}{urgency}",
        id = card.id,
        name = card.name,
        period = format_period(card.start, card.end),
        label = card.deadline.label,
    );
    if let Some(comment) = card.comment.as_deref().filter(|text| !text.is_empty()) {
        println!("        {comment}");
    }
}

/// "8/25 09:00 ~ 8/26 18:30" in local time.
fn format_period(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let start = start.with_timezone(&Local);
    let end = end.with_timezone(&Local);
    format!(
        "{} ~ {}",
        start.format("%-m/%-d %H:%M"),
        end.format("%-m/%-d %H:%M")
    )
}
