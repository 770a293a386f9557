use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use std::cell::Cell;
use std::rc::Rc;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    RepoError, SqliteTaskStore, StoreError, StoreResult, Task, TaskDraft, TaskRepository,
    TaskStore, TaskValidationError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
}

fn instant(text: &str) -> DateTime<Utc> {
    text.parse().unwrap()
}

fn draft(name: &str, start: &str, end: &str) -> TaskDraft {
    TaskDraft::new(name, instant(start), instant(end))
}

/// Counts `save` calls going through to the real store.
struct CountingStore<'conn> {
    inner: SqliteTaskStore<'conn>,
    saves: Rc<Cell<usize>>,
}

impl TaskStore for CountingStore<'_> {
    fn load(&self) -> StoreResult<Vec<Task>> {
        self.inner.load()
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        self.saves.set(self.saves.get() + 1);
        self.inner.save(tasks)
    }
}

fn counting_repo(conn: &Connection) -> (TaskRepository<CountingStore<'_>>, Rc<Cell<usize>>) {
    let saves = Rc::new(Cell::new(0));
    let store = CountingStore {
        inner: SqliteTaskStore::try_new(conn).unwrap(),
        saves: Rc::clone(&saves),
    };
    (TaskRepository::open(store).unwrap(), saves)
}

/// Loads fine but refuses every save, like a full disk.
struct FailingStore;

impl TaskStore for FailingStore {
    fn load(&self) -> StoreResult<Vec<Task>> {
        Ok(Vec::new())
    }

    fn save(&self, _tasks: &[Task]) -> StoreResult<()> {
        Err(StoreError::InvalidData("write refused".to_string()))
    }
}

#[test]
fn add_assigns_time_derived_unique_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();

    let at = now();
    let first = repo
        .add(draft("a", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"), at)
        .unwrap();
    let second = repo
        .add(draft("b", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"), at)
        .unwrap();

    assert_eq!(first, at.timestamp_millis());
    // Same-millisecond creation still yields a unique id.
    assert_eq!(second, first + 1);
}

#[test]
fn add_persists_across_reopen() {
    let conn = open_db_in_memory().unwrap();

    let id = {
        let store = SqliteTaskStore::try_new(&conn).unwrap();
        let mut repo = TaskRepository::open(store).unwrap();
        repo.add(
            draft("persisted", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"),
            now(),
        )
        .unwrap()
    };

    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let repo = TaskRepository::open(store).unwrap();
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get(id).unwrap().name, "persisted");
}

#[test]
fn add_validation_failure_leaves_repository_untouched() {
    let conn = open_db_in_memory().unwrap();
    let (mut repo, saves) = counting_repo(&conn);

    let err = repo
        .add(draft("", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"), now())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyName)
    ));

    let err = repo
        .add(draft("X", "2024-07-02T10:00:00Z", "2024-07-02T09:00:00Z"), now())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::InvalidTimeWindow { .. })
    ));

    assert!(repo.is_empty());
    assert_eq!(saves.get(), 0);
}

#[test]
fn update_replaces_fields_and_preserves_completed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();

    let id = repo
        .add(
            draft("before", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"),
            now(),
        )
        .unwrap();
    repo.toggle_completed(id).unwrap();

    let updated =
        draft("after", "2024-07-03T09:00:00Z", "2024-07-03T11:00:00Z").with_comment("moved");
    repo.update(id, updated).unwrap();

    let task = repo.get(id).unwrap();
    assert_eq!(task.name, "after");
    assert_eq!(task.end, instant("2024-07-03T11:00:00Z"));
    assert_eq!(task.comment.as_deref(), Some("moved"));
    assert!(task.completed, "edit must not clear the completion flag");
}

#[test]
fn update_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();

    let err = repo
        .update(404, draft("x", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(404)));
}

#[test]
fn update_validation_failure_keeps_original() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();

    let id = repo
        .add(
            draft("original", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"),
            now(),
        )
        .unwrap();

    let err = repo
        .update(id, draft("", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.get(id).unwrap().name, "original");
}

#[test]
fn remove_returns_task_and_double_delete_is_an_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();

    let id = repo
        .add(
            draft("short lived", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"),
            now(),
        )
        .unwrap();

    let removed = repo.remove(id).unwrap();
    assert_eq!(removed.name, "short lived");
    assert!(repo.is_empty());

    assert!(matches!(repo.remove(id), Err(RepoError::NotFound(_))));
}

#[test]
fn toggle_flips_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();

    let id = repo
        .add(
            draft("flip me", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"),
            now(),
        )
        .unwrap();

    assert!(repo.toggle_completed(id).unwrap());
    assert!(!repo.toggle_completed(id).unwrap());
    assert!(matches!(
        repo.toggle_completed(404),
        Err(RepoError::NotFound(404))
    ));

    repo.toggle_completed(id).unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let reloaded = TaskRepository::open(store).unwrap();
    assert!(reloaded.get(id).unwrap().completed);
}

#[test]
fn bulk_remove_finished_removes_exact_set_in_one_save() {
    let conn = open_db_in_memory().unwrap();
    let (mut repo, saves) = counting_repo(&conn);
    let at = now();

    let active = repo
        .add(
            draft("active", "2024-07-01T09:00:00Z", "2024-07-02T10:00:00Z"),
            at,
        )
        .unwrap();
    let completed = repo
        .add(
            draft("completed", "2024-07-01T09:00:00Z", "2024-07-03T10:00:00Z"),
            at,
        )
        .unwrap();
    repo.toggle_completed(completed).unwrap();
    let expired = repo
        .add(
            draft("expired", "2024-06-30T09:00:00Z", "2024-07-01T10:00:00Z"),
            at,
        )
        .unwrap();
    assert!(repo.get(expired).unwrap().end < at);

    let saves_before = saves.get();
    let removed = repo.bulk_remove_finished(at).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(saves.get(), saves_before + 1, "one save for the whole batch");
    assert_eq!(repo.len(), 1);
    assert!(repo.get(active).is_some());

    // Nothing finished left: the batch is a no-op and skips the save.
    assert_eq!(repo.bulk_remove_finished(at).unwrap(), 0);
    assert_eq!(saves.get(), saves_before + 1);
}

#[test]
fn completed_count_tracks_explicit_completion_only() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    let mut repo = TaskRepository::open(store).unwrap();
    let at = now();

    repo.add(
        draft("active", "2024-07-01T09:00:00Z", "2024-07-02T10:00:00Z"),
        at,
    )
    .unwrap();
    // Expired but never completed: not counted.
    repo.add(
        draft("expired", "2024-06-30T09:00:00Z", "2024-07-01T10:00:00Z"),
        at,
    )
    .unwrap();
    let completed = repo
        .add(
            draft("completed", "2024-07-01T09:00:00Z", "2024-07-03T10:00:00Z"),
            at,
        )
        .unwrap();
    repo.toggle_completed(completed).unwrap();

    assert_eq!(repo.completed_count(), 1);
    assert_eq!(repo.len(), 3);
}

#[test]
fn failed_save_surfaces_error_but_keeps_memory_state() {
    let mut repo = TaskRepository::open(FailingStore).unwrap();

    let err = repo
        .add(
            draft("kept in memory", "2024-07-02T09:00:00Z", "2024-07-02T10:00:00Z"),
            now(),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Store(_)));

    // The in-memory list stays authoritative for the next save attempt.
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.tasks()[0].name, "kept in memory");
}
