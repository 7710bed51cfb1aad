//! SQLite-backed slot storage.

use super::{SlotStorage, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Durable slot storage over a migrated connection (see `db::open_db`).
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStorage for SqliteSlotStorage<'_> {
    fn read_slot(&self, name: &str) -> StorageResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&mut self, name: &str, payload: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO slots (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![name, payload],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSlotStorage;
    use crate::db::open_db_in_memory;
    use crate::storage::SlotStorage;

    #[test]
    fn missing_slot_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let storage = SqliteSlotStorage::new(&conn);
        assert_eq!(storage.read_slot("todos").unwrap(), None);
    }

    #[test]
    fn write_replaces_existing_payload() {
        let conn = open_db_in_memory().unwrap();
        let mut storage = SqliteSlotStorage::new(&conn);

        storage.write_slot("todos", "[]").unwrap();
        storage.write_slot("todos", "[1]").unwrap();
        storage.write_slot("other", "null").unwrap();

        assert_eq!(storage.read_slot("todos").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.read_slot("other").unwrap().as_deref(), Some("null"));
    }
}
