//! SQLite bootstrap for the durable slot backend.
//!
//! # Invariants
//! - Connections handed out by `open_db*` carry a `slots` table whose columns
//!   match what `SqliteSlotStorage` reads and writes.
//! - A database stamped with a newer slot schema is never touched.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_slot_schema, SLOT_SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was written by a build with a newer slot layout.
    NewerSlotSchema { found: u32, supported: u32 },
    /// A `slots` table exists but lacks columns the slot backend needs.
    SlotTableMismatch { missing: Vec<&'static str> },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NewerSlotSchema { found, supported } => write!(
                f,
                "slot schema version {found} was written by a newer build (this build reads up to {supported})"
            ),
            Self::SlotTableMismatch { missing } => write!(
                f,
                "existing `slots` table is missing columns: {}",
                missing.join(", ")
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerSlotSchema { .. } | Self::SlotTableMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
