//! taskdeck command-line interface.
//!
//! Thin presentation layer over `taskdeck_core`: parses user input, runs
//! one repository mutation or view query against the application state,
//! then renders the derived view models as text.

mod commands;
mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskdeck_core::{SqliteTaskStore, TaskService};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Manage your tasks from the terminal, with list and calendar views")]
struct Cli {
    /// Path to the task database (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task name
        name: String,
        /// Start date/time, local wall clock (e.g. "2026-08-25T09:00")
        #[arg(short, long)]
        start: String,
        /// End date/time, local wall clock
        #[arg(short, long)]
        end: String,
        /// Optional free-text comment
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Show active and finished tasks
    List,
    /// Edit an existing task (unset options keep their current value)
    Edit {
        /// Task id
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Toggle a task's completion flag
    Done {
        /// Task id
        id: i64,
    },
    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },
    /// Delete all finished (completed or expired) tasks
    Clear,
    /// Show the month calendar
    Cal {
        /// Month to show as YYYY-MM (defaults to the current month)
        month: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let db_path = match cli.db {
        Some(path) => path,
        None => data_dir()?.join("tasks.db"),
    };
    let conn = taskdeck_core::db::open_db(&db_path)
        .with_context(|| format!("opening task database at {}", db_path.display()))?;
    let store = SqliteTaskStore::try_new(&conn)?;
    let mut service = TaskService::open(store)?;

    match cli.command {
        Commands::Add {
            name,
            start,
            end,
            comment,
        } => commands::task::add(&mut service, name, &start, &end, comment),
        Commands::List => commands::list::run(&service),
        Commands::Edit {
            id,
            name,
            start,
            end,
            comment,
        } => commands::task::edit(&mut service, id, name, start, end, comment),
        Commands::Done { id } => commands::task::done(&mut service, id),
        Commands::Rm { id } => commands::task::rm(&mut service, id),
        Commands::Clear => commands::task::clear(&mut service),
        Commands::Cal { month } => commands::cal::run(&service, month.as_deref()),
    }
}

/// Data directory for the database and logs (~/.local/share/taskdeck on
/// Linux, the platform equivalent elsewhere).
fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("could not determine the platform data directory")?
        .join("taskdeck");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    Ok(dir)
}

fn init_logging() -> Result<()> {
    let log_dir = data_dir()?.join("logs");
    taskdeck_core::init_logging(
        taskdeck_core::default_log_level(),
        &log_dir.to_string_lossy(),
    )
    .map_err(anyhow::Error::msg)
}
