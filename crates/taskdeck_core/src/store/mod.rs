//! Persistent Store: durable storage for the task list.
//!
//! # Responsibility
//! - Define the storage contract the repository persists through.
//! - Keep serialization and SQL details behind that contract.
//!
//! # Invariants
//! - The whole task list is one unit of persistence: `save` replaces the
//!   stored sequence, `load` returns it in full.
//! - Loaded records are validated; invalid persisted state is rejected
//!   instead of masked.

use crate::db::DbError;
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite_store;

pub use sqlite_store::{SqliteTaskStore, TASKS_SLOT};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by persistence operations.
///
/// A failed `save` leaves the caller's in-memory state authoritative; the
/// next successful save reconciles the stored copy.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Json(serde_json::Error),
    InvalidData(String),
    UnsupportedPayloadVersion { found: u32, latest_supported: u32 },
    Uninitialized,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed task payload: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UnsupportedPayloadVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "task payload version {found} is newer than supported {latest_supported}"
            ),
            Self::Uninitialized => write!(
                f,
                "storage schema is missing the slots table; open the database through open_db"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::UnsupportedPayloadVersion { .. } => None,
            Self::Uninitialized => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Storage contract for the task list.
pub trait TaskStore {
    /// Returns the stored tasks, or an empty list when nothing was stored
    /// yet.
    fn load(&self) -> StoreResult<Vec<Task>>;

    /// Replaces the stored task list.
    fn save(&self, tasks: &[Task]) -> StoreResult<()>;
}
