//! Store configuration.

use std::path::PathBuf;

/// Slot name used when none is configured.
pub const DEFAULT_SLOT: &str = "todos";

/// Where a session keeps its todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file; `None` keeps the session in memory.
    pub db_path: Option<PathBuf>,
    pub slot: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            slot: DEFAULT_SLOT.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds a config, falling back to `DEFAULT_SLOT` for a blank slot name.
    pub fn new(db_path: Option<PathBuf>, slot: Option<&str>) -> Self {
        let slot = slot
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SLOT);
        Self {
            db_path,
            slot: slot.to_string(),
        }
    }
}
