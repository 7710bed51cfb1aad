//! Core domain logic for the todo list.
//! This crate is the single source of truth for todo invariants.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod storage;
pub mod store;

pub use codec::{decode_collection, encode_collection, DecodedCollection, ParseError};
pub use config::{StoreConfig, DEFAULT_SLOT};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::todo::{
    parse_due_date, Priority, TodoFilter, TodoIndex, TodoRecord, TodoValidationError,
};
pub use render::{render, render_line, RenderItem};
pub use storage::{MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError};
pub use store::{LoadFailure, LoadOutcome, StoreResult, TodoCounts, TodoStore, TodoStoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
