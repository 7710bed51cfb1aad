//! In-process slot storage with an optional size quota.

use super::{SlotStorage, StorageError, StorageResult};
use std::collections::HashMap;

/// Slot storage kept in a `HashMap`; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage that rejects payloads longer than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Replaces the quota; `None` removes the limit.
    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Seeds a slot directly, bypassing the quota.
    pub fn insert_raw(&mut self, name: impl Into<String>, payload: impl Into<String>) {
        self.slots.insert(name.into(), payload.into());
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, name: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(name).cloned())
    }

    fn write_slot(&mut self, name: &str, payload: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            if payload.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    limit,
                    attempted: payload.len(),
                });
            }
        }
        self.slots.insert(name.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySlotStorage;
    use crate::storage::{SlotStorage, StorageError};

    #[test]
    fn quota_rejects_oversized_payload_and_keeps_previous_value() {
        let mut storage = MemorySlotStorage::with_quota(4);
        storage.write_slot("todos", "[]").unwrap();

        let err = storage.write_slot("todos", "[1,2,3]").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                limit: 4,
                attempted: 7
            }
        ));
        assert_eq!(storage.read_slot("todos").unwrap().as_deref(), Some("[]"));

        storage.set_quota(None);
        storage.write_slot("todos", "[1,2,3]").unwrap();
        assert_eq!(
            storage.read_slot("todos").unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }
}
