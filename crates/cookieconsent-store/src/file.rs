//! Slot storage persisted to a single JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use cookieconsent_core::Result;

use crate::storage::KeyValueStorage;

/// `KeyValueStorage` backed by a JSON object on disk.
///
/// The whole slot map is loaded on open and rewritten on every `set_item`.
/// A write that fails leaves both the file and the in-memory map unchanged.
pub struct FileStorage {
    path: PathBuf,
    slots: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let slots: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Discarding unreadable storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        debug!("FileStorage opened: {} slots, path={}", slots.len(), path.display());

        Self {
            path,
            slots: RwLock::new(slots),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(slots)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write();
        let mut updated = slots.clone();
        updated.insert(key.to_string(), value.to_string());
        self.save(&updated)?;
        *slots = updated;
        Ok(())
    }
}
