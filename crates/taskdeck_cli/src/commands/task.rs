//! Mutation commands: add, edit, toggle, delete, bulk-clear.

use crate::input::parse_local_datetime;
use anyhow::{Context, Result};
use chrono::Utc;
use taskdeck_core::{TaskDraft, TaskService, TaskStore};

pub fn add<S: TaskStore>(
    service: &mut TaskService<S>,
    name: String,
    start: &str,
    end: &str,
    comment: Option<String>,
) -> Result<()> {
    let draft = TaskDraft {
        name,
        start: parse_local_datetime(start)?,
        end: parse_local_datetime(end)?,
        comment,
    };
    let id = service.add(draft, Utc::now())?;
    println!("added task #{id}");
    Ok(())
}

/// Partial edit: options left unset keep the task's current values.
pub fn edit<S: TaskStore>(
    service: &mut TaskService<S>,
    id: i64,
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
    comment: Option<String>,
) -> Result<()> {
    let current = service
        .get(id)
        .cloned()
        .with_context(|| format!("task not found: {id}"))?;

    let draft = TaskDraft {
        name: name.unwrap_or(current.name),
        start: match start {
            Some(text) => parse_local_datetime(&text)?,
            None => current.start,
        },
        end: match end {
            Some(text) => parse_local_datetime(&text)?,
            None => current.end,
        },
        comment: comment.or(current.comment),
    };
    service.update(id, draft)?;
    println!("updated task #{id}");
    Ok(())
}

pub fn done<S: TaskStore>(service: &mut TaskService<S>, id: i64) -> Result<()> {
    let completed = service.toggle_completed(id)?;
    let state = if completed { "completed" } else { "active" };
    println!("task #{id} is now {state}");
    Ok(())
}

pub fn rm<S: TaskStore>(service: &mut TaskService<S>, id: i64) -> Result<()> {
    let removed = service.remove(id)?;
    println!("deleted task #{id} ({})", removed.name);
    Ok(())
}

pub fn clear<S: TaskStore>(service: &mut TaskService<S>) -> Result<()> {
    let removed = service.clear_finished(Utc::now())?;
    match removed {
        0 => println!("nothing to clear"),
        1 => println!("removed 1 finished task"),
        n => println!("removed {n} finished tasks"),
    }
    Ok(())
}
