//! Consent record persistence over a single storage slot.

use tracing::debug;

use cookieconsent_core::{ConsentConfig, ConsentRecord, Result};

use crate::storage::KeyValueStorage;

/// Reads and writes the one stored consent decision.
pub trait ConsentStore {
    /// The stored record, `Ok(None)` if none has been saved.
    fn get(&self) -> Result<Option<ConsentRecord>>;

    /// Replace the stored record.
    fn set(&self, record: &ConsentRecord) -> Result<()>;
}

/// `ConsentStore` keeping the record as JSON under a fixed key.
pub struct KeyedConsentStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> KeyedConsentStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Store under the configured `storage_key`.
    pub fn from_config(storage: S, config: &ConsentConfig) -> Self {
        Self::new(storage, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage> ConsentStore for KeyedConsentStore<S> {
    fn get(&self) -> Result<Option<ConsentRecord>> {
        match self.storage.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    fn set(&self, record: &ConsentRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.storage.set_item(&self.key, &json)?;
        debug!("Stored consent record under {}", self.key);
        Ok(())
    }
}

impl<C: ConsentStore + ?Sized> ConsentStore for &C {
    fn get(&self) -> Result<Option<ConsentRecord>> {
        (**self).get()
    }

    fn set(&self, record: &ConsentRecord) -> Result<()> {
        (**self).set(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use cookieconsent_core::Error;

    fn record(analytics: bool, marketing: bool) -> ConsentRecord {
        ConsentRecord {
            analytics,
            marketing,
            timestamp: "2024-06-01T08:15:30.123Z".into(),
        }
    }

    #[test]
    fn test_round_trip_preserves_timestamp() {
        let store = KeyedConsentStore::new(MemoryStorage::new(), "consent");
        let saved = record(false, true);
        store.set(&saved).unwrap();
        assert_eq!(store.get().unwrap(), Some(saved));
    }

    #[test]
    fn test_empty_slot_is_absent() {
        let store = KeyedConsentStore::new(MemoryStorage::new(), "consent");
        assert_eq!(store.get().unwrap(), None);

        store.storage().set_item("consent", "").unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces_whole_record() {
        let store = KeyedConsentStore::new(MemoryStorage::new(), "consent");
        store.set(&record(true, true)).unwrap();
        store.set(&record(false, false)).unwrap();

        let raw = store.storage().get_item("consent").unwrap().unwrap();
        assert_eq!(
            raw,
            r#"{"analytics":false,"marketing":false,"timestamp":"2024-06-01T08:15:30.123Z"}"#
        );
    }

    #[test]
    fn test_malformed_value_is_json_error() {
        let store = KeyedConsentStore::new(MemoryStorage::new(), "consent");
        store.storage().set_item("consent", "{not json").unwrap();
        assert!(matches!(store.get(), Err(Error::Json(_))));
    }

    #[test]
    fn test_from_config_uses_storage_key() {
        let config = ConsentConfig::default();
        let store = KeyedConsentStore::from_config(MemoryStorage::new(), &config);
        assert_eq!(store.key(), "fluidcast-cookie-consent");
    }
}
