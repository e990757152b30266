//! In-process slot storage with browser-like failure modes.

use std::collections::HashMap;

use parking_lot::RwLock;

use cookieconsent_core::{Error, Result};

use crate::storage::KeyValueStorage;

/// In-memory `KeyValueStorage`.
///
/// Can be given a byte quota (keys plus values, like `localStorage`) or
/// created blocked, in which case every access fails the way storage does
/// when a browser denies it to the page.
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    blocked: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota: None,
            blocked: false,
        }
    }

    /// Storage that rejects writes once stored bytes would exceed `limit`.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::new()
        }
    }

    /// Storage that fails every read and write.
    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::new()
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    fn check_access(&self) -> Result<()> {
        if self.blocked {
            return Err(Error::StorageUnavailable("storage access denied".into()));
        }
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_access()?;
        Ok(self.slots.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_access()?;
        let mut slots = self.slots.write();

        if let Some(limit) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(Error::QuotaExceeded { needed, limit });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
