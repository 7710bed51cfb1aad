use rusqlite::Connection;
use todo_core::db::{open_db, open_db_in_memory, DbError, SLOT_SCHEMA_VERSION};
use todo_core::{SlotStorage, SqliteSlotStorage};

#[test]
fn fresh_database_gets_stamped_slot_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), SLOT_SCHEMA_VERSION);
    let storage = SqliteSlotStorage::new(&conn);
    assert_eq!(storage.read_slot("todos").unwrap(), None);
}

#[test]
fn slot_payload_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");
    let payload = r#"[{"text":"Buy milk","priority":"low","dueDate":null,"completed":true}]"#;

    {
        let conn = open_db(&path).unwrap();
        SqliteSlotStorage::new(&conn)
            .write_slot("todos", payload)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), SLOT_SCHEMA_VERSION);
    assert_eq!(
        SqliteSlotStorage::new(&conn).read_slot("todos").unwrap().as_deref(),
        Some(payload)
    );
}

#[test]
fn unstamped_file_with_compatible_slots_table_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE slots (name TEXT PRIMARY KEY NOT NULL, payload TEXT NOT NULL, updated_at INTEGER NOT NULL DEFAULT 0);
         INSERT INTO slots (name, payload) VALUES ('todos', '[]');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), SLOT_SCHEMA_VERSION);
    assert_eq!(
        SqliteSlotStorage::new(&conn).read_slot("todos").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn foreign_slots_table_is_rejected_and_left_unstamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE slots (name TEXT PRIMARY KEY, body BLOB);")
        .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SlotTableMismatch { missing } => {
            assert_eq!(missing, vec!["payload", "updated_at"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(user_version(&conn), 0);
}

#[test]
fn newer_slot_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::NewerSlotSchema {
            found: 7,
            supported: SLOT_SCHEMA_VERSION
        }
    ));
    assert!(err.to_string().contains("newer build"));
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
