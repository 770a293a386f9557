//! SQLite-backed task store.
//!
//! The whole task list is kept as one JSON text payload in a single
//! key-value slot, mirroring the legacy storage layout. Writes produce a
//! versioned envelope; reads also accept the legacy unversioned format (a
//! bare array of records).

use super::{StoreError, StoreResult, TaskStore};
use crate::model::task::Task;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Slot key holding the serialized task list.
pub const TASKS_SLOT: &str = "tasks";

/// Version written into new payloads. Bump when the record shape changes.
const PAYLOAD_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Versioned(Envelope),
    /// The format predating the envelope: a bare array of records.
    Legacy(Vec<Task>),
}

/// Task store persisting into the `slots` table of a SQLite connection.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Wraps a bootstrapped connection.
    ///
    /// Rejects connections whose schema was not set up through
    /// [`crate::db::open_db`].
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let has_slots: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if !has_slots {
            return Err(StoreError::Uninitialized);
        }
        Ok(Self { conn })
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn load(&self) -> StoreResult<Vec<Task>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [TASKS_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            None => Ok(Vec::new()),
            Some(text) => decode_payload(&text),
        }
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let payload = serde_json::to_string(&EnvelopeRef {
            version: PAYLOAD_VERSION,
            tasks,
        })?;

        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TASKS_SLOT, payload],
        )?;

        Ok(())
    }
}

fn decode_payload(text: &str) -> StoreResult<Vec<Task>> {
    let tasks = match serde_json::from_str::<Payload>(text)? {
        Payload::Versioned(envelope) => {
            if envelope.version > PAYLOAD_VERSION {
                return Err(StoreError::UnsupportedPayloadVersion {
                    found: envelope.version,
                    latest_supported: PAYLOAD_VERSION,
                });
            }
            envelope.tasks
        }
        Payload::Legacy(tasks) => tasks,
    };

    let mut seen = HashSet::new();
    for task in &tasks {
        task.validate()
            .map_err(|err| StoreError::InvalidData(format!("task {}: {err}", task.id)))?;
        if !seen.insert(task.id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }

    Ok(tasks)
}
