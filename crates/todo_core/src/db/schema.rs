//! Slot table schema setup and verification.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Layout version stamped into `PRAGMA user_version`.
pub const SLOT_SCHEMA_VERSION: u32 = 1;

const SLOT_COLUMNS: [&str; 3] = ["name", "payload", "updated_at"];

const CREATE_SLOTS_SQL: &str = "CREATE TABLE IF NOT EXISTS slots (
    name TEXT PRIMARY KEY NOT NULL,
    payload TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Creates the `slots` table on a fresh file and checks it on a known one.
///
/// Existing slot payloads are never rewritten.
///
/// # Errors
/// - `NewerSlotSchema` when the file is stamped above `SLOT_SCHEMA_VERSION`.
/// - `SlotTableMismatch` when a pre-existing `slots` table lacks a column.
pub fn ensure_slot_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SLOT_SCHEMA_VERSION {
        return Err(DbError::NewerSlotSchema {
            found,
            supported: SLOT_SCHEMA_VERSION,
        });
    }

    if found == SLOT_SCHEMA_VERSION {
        return verify_slot_columns(conn);
    }

    // The stamp is only written once the table checks out, so a rejected
    // file is left as it was.
    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_SLOTS_SQL)?;
    verify_slot_columns(&tx)?;
    tx.pragma_update(None, "user_version", SLOT_SCHEMA_VERSION)?;
    tx.commit()?;
    info!(
        "event=slot_schema module=db status=created from_version={found} to_version={SLOT_SCHEMA_VERSION}"
    );
    Ok(())
}

fn verify_slot_columns(conn: &Connection) -> DbResult<()> {
    let missing = missing_slot_columns(conn)?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DbError::SlotTableMismatch { missing })
    }
}

fn missing_slot_columns(conn: &Connection) -> DbResult<Vec<&'static str>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('slots');")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SLOT_COLUMNS
        .into_iter()
        .filter(|column| !present.iter().any(|name| name == column))
        .collect())
}
