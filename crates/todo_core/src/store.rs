//! Todo store: owned collection, write-through persistence and filtered views.
//!
//! # Responsibility
//! - Load the collection once per session, failing open to an empty list.
//! - Apply `add` and `toggle_completed` and write the full collection through.
//! - Answer lazy, borrowed views filtered by completion state.
//!
//! # Invariants
//! - Records are appended only; insertion order is display order.
//! - Validation happens before any mutation.
//! - A failed write never rolls back the in-memory mutation; the store stays
//!   dirty until a later write succeeds.
//! - Filtering never mutates and never persists.
//!
//! # Known limitations
//! - Two sessions sharing one slot race; the last writer wins.

use crate::codec::{decode_collection, encode_collection, ParseError};
use crate::model::todo::{Priority, TodoFilter, TodoIndex, TodoRecord, TodoValidationError};
use crate::storage::{SlotStorage, StorageError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, TodoStoreError>;

/// Error returned by mutating store operations.
#[derive(Debug)]
pub enum TodoStoreError {
    /// Input rejected before touching state.
    Validation(TodoValidationError),
    /// Mutation applied in memory but the write-through failed.
    Persistence(StorageError),
    /// No record at the given index.
    NotFound(TodoIndex),
}

impl Display for TodoStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to persist todos: {err}"),
            Self::NotFound(index) => write!(f, "todo not found at index {index}"),
        }
    }
}

impl Error for TodoStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TodoValidationError> for TodoStoreError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for TodoStoreError {
    fn from(value: StorageError) -> Self {
        Self::Persistence(value)
    }
}

/// Why a load fell back to an empty collection.
#[derive(Debug)]
pub enum LoadFailure {
    Read(StorageError),
    Parse(ParseError),
}

impl Display for LoadFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

/// How the in-memory collection was obtained.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Slot decoded; `skipped` elements were unusable and dropped.
    Restored { count: usize, skipped: usize },
    /// Slot has never been written.
    Empty,
    /// Slot was unreadable or corrupt; the session starts empty.
    Recovered(LoadFailure),
}

/// Record counts for summary views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Owned todo collection bound to one storage slot.
pub struct TodoStore<S: SlotStorage> {
    storage: S,
    slot: String,
    records: Vec<TodoRecord>,
    dirty: bool,
}

impl<S: SlotStorage> TodoStore<S> {
    /// Loads the slot and returns the store with a description of the load.
    ///
    /// Never fails: unreadable or corrupt state yields an empty store.
    pub fn load(storage: S, slot: impl Into<String>) -> (Self, LoadOutcome) {
        let mut store = Self {
            storage,
            slot: slot.into(),
            records: Vec::new(),
            dirty: false,
        };
        let outcome = store.reload();
        (store, outcome)
    }

    /// Same as [`TodoStore::load`], discarding the outcome.
    pub fn open(storage: S, slot: impl Into<String>) -> Self {
        Self::load(storage, slot).0
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Unflushed changes are discarded.
    pub fn reload(&mut self) -> LoadOutcome {
        self.dirty = false;
        let (records, outcome) = match self.storage.read_slot(&self.slot) {
            Ok(None) => (Vec::new(), LoadOutcome::Empty),
            Ok(Some(payload)) => match decode_collection(&payload) {
                Ok(decoded) => {
                    let outcome = LoadOutcome::Restored {
                        count: decoded.records.len(),
                        skipped: decoded.skipped,
                    };
                    (decoded.records, outcome)
                }
                Err(err) => (Vec::new(), LoadOutcome::Recovered(LoadFailure::Parse(err))),
            },
            Err(err) => (Vec::new(), LoadOutcome::Recovered(LoadFailure::Read(err))),
        };
        self.records = records;

        match &outcome {
            LoadOutcome::Restored { count, skipped } => {
                if *skipped > 0 {
                    warn!(
                        "event=todo_load module=store status=partial slot={} count={count} skipped={skipped}",
                        self.slot
                    );
                } else {
                    info!(
                        "event=todo_load module=store status=ok slot={} count={count}",
                        self.slot
                    );
                }
            }
            LoadOutcome::Empty => {
                info!("event=todo_load module=store status=empty slot={}", self.slot);
            }
            LoadOutcome::Recovered(failure) => {
                warn!(
                    "event=todo_load module=store status=recovered slot={} error={failure}",
                    self.slot
                );
            }
        }

        outcome
    }

    /// Appends a new active record and writes the collection through.
    ///
    /// # Errors
    /// - `Validation` when `text` is blank; the collection is unchanged.
    /// - `Persistence` when the write fails; the record stays in memory.
    pub fn add(
        &mut self,
        text: impl AsRef<str>,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<&[TodoRecord]> {
        let record = TodoRecord::new(text, priority, due_date).map_err(|err| {
            debug!("event=todo_add module=store status=rejected error={err}");
            err
        })?;
        self.records.push(record);
        self.persist("todo_add")?;
        Ok(&self.records)
    }

    /// Flips completion on one record and writes the collection through.
    ///
    /// # Errors
    /// - `NotFound` when `index` is out of range; nothing changes.
    /// - `Persistence` when the write fails; the toggle stays in memory.
    pub fn toggle_completed(&mut self, index: TodoIndex) -> StoreResult<&[TodoRecord]> {
        let record = self
            .records
            .get_mut(index.0)
            .ok_or(TodoStoreError::NotFound(index))?;
        record.toggle();
        self.persist("todo_toggle")?;
        Ok(&self.records)
    }

    /// Retries persisting the in-memory collection.
    pub fn flush(&mut self) -> StoreResult<()> {
        self.persist("todo_flush")
    }

    pub fn get_all(&self) -> &[TodoRecord] {
        &self.records
    }

    /// Lazy view of records matching `filter`, paired with their indices.
    pub fn filter(
        &self,
        filter: TodoFilter,
    ) -> impl Iterator<Item = (TodoIndex, &TodoRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, record)| filter.matches(record))
            .map(|(position, record)| (TodoIndex(position), record))
    }

    pub fn get_filtered(&self, filter: TodoFilter) -> Vec<&TodoRecord> {
        self.filter(filter).map(|(_, record)| record).collect()
    }

    pub fn get(&self, index: TodoIndex) -> Option<&TodoRecord> {
        self.records.get(index.0)
    }

    pub fn counts(&self) -> TodoCounts {
        let completed = self.records.iter().filter(|r| r.is_completed()).count();
        TodoCounts {
            total: self.records.len(),
            active: self.records.len() - completed,
            completed,
        }
    }

    /// Whether the latest mutation has not reached storage yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self, event: &'static str) -> StoreResult<()> {
        let result = encode_collection(&self.records)
            .map_err(StorageError::from)
            .and_then(|payload| self.storage.write_slot(&self.slot, &payload));

        match result {
            Ok(()) => {
                self.dirty = false;
                info!(
                    "event={event} module=store status=ok slot={} count={}",
                    self.slot,
                    self.records.len()
                );
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                warn!(
                    "event={event} module=store status=error slot={} count={} error_code=persist_failed error={err}",
                    self.slot,
                    self.records.len()
                );
                Err(err.into())
            }
        }
    }
}
