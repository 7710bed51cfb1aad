use chrono::NaiveDate;
use rusqlite::Connection;
use todo_core::db::open_db;
use todo_core::{
    LoadFailure, LoadOutcome, Priority, SlotStorage, SqliteSlotStorage, TodoFilter, TodoIndex,
    TodoStore, TodoStoreError,
};

#[test]
fn collection_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");
    let due = NaiveDate::from_ymd_opt(2026, 12, 24);

    {
        let conn = open_db(&path).unwrap();
        let mut store = TodoStore::open(SqliteSlotStorage::new(&conn), "todos");
        store.add("Buy milk", Priority::Low, None).unwrap();
        store.add("Wrap presents", Priority::High, due).unwrap();
        store.toggle_completed(TodoIndex(0)).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let (store, outcome) = TodoStore::load(SqliteSlotStorage::new(&conn), "todos");
    assert!(matches!(
        outcome,
        LoadOutcome::Restored {
            count: 2,
            skipped: 0
        }
    ));

    let all = store.get_all();
    assert_eq!(all[0].text(), "Buy milk");
    assert!(all[0].is_completed());
    assert_eq!(all[1].text(), "Wrap presents");
    assert_eq!(all[1].priority(), Priority::High);
    assert_eq!(all[1].due_date(), due);
    assert!(all[1].is_active());

    let active: Vec<&str> = store
        .get_filtered(TodoFilter::Active)
        .into_iter()
        .map(|record| record.text())
        .collect();
    assert_eq!(active, vec!["Wrap presents"]);
}

#[test]
fn persisted_slot_matches_wire_layout() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("todos.sqlite3")).unwrap();
    let mut store = TodoStore::open(SqliteSlotStorage::new(&conn), "todos");
    store.add("Buy milk", Priority::Low, None).unwrap();

    let payload = store.storage().read_slot("todos").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"text": "Buy milk", "priority": "low", "dueDate": null, "completed": false}
        ])
    );
}

#[test]
fn corrupt_sqlite_slot_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("todos.sqlite3")).unwrap();
    let mut storage = SqliteSlotStorage::new(&conn);
    storage.write_slot("todos", "\"just a string\"").unwrap();

    let (mut store, outcome) = TodoStore::load(storage, "todos");
    assert!(matches!(outcome, LoadOutcome::Recovered(_)));
    assert!(store.get_all().is_empty());

    store.add("Start over", Priority::Low, None).unwrap();
    assert_eq!(store.get_all().len(), 1);
}

#[test]
fn unreadable_slot_table_fails_open_and_later_writes_report_persistence() {
    let conn = Connection::open_in_memory().unwrap();

    let (mut store, outcome) = TodoStore::load(SqliteSlotStorage::new(&conn), "todos");
    assert!(matches!(
        outcome,
        LoadOutcome::Recovered(LoadFailure::Read(_))
    ));
    assert!(store.get_all().is_empty());

    let err = store.add("Buy milk", Priority::Low, None).unwrap_err();
    assert!(matches!(err, TodoStoreError::Persistence(_)));
    assert!(store.is_dirty());
    assert_eq!(store.get_all().len(), 1);
}
