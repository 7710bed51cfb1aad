//! Named-slot persistence backends.
//!
//! # Responsibility
//! - Define the slot contract the store persists through.
//! - Provide durable (SQLite) and in-process (memory) implementations.
//!
//! # Invariants
//! - A slot holds exactly one payload; writes replace it wholesale.
//! - Reading a slot that was never written returns `Ok(None)`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySlotStorage;
pub use sqlite::SqliteSlotStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing a slot.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Collection could not be serialized into a payload.
    Encode(serde_json::Error),
    /// Payload is larger than the backend accepts.
    QuotaExceeded { limit: usize, attempted: usize },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode todo payload: {err}"),
            Self::QuotaExceeded { limit, attempted } => write!(
                f,
                "storage quota exceeded: payload of {attempted} bytes exceeds limit of {limit} bytes"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value slot storage used by the todo store.
pub trait SlotStorage {
    fn read_slot(&self, name: &str) -> StorageResult<Option<String>>;
    fn write_slot(&mut self, name: &str, payload: &str) -> StorageResult<()>;
}
