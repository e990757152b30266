//! Consent widget configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const DEFAULT_STORAGE_KEY: &str = "fluidcast-cookie-consent";
pub const DEFAULT_TRACKING_ID: &str = "G-80XZVYXSQX";

/// Prefix of the window-level opt-out property the analytics library checks.
const DISABLE_FLAG_PREFIX: &str = "ga-disable-";

/// Where the decision is stored and which analytics property it controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentConfig {
    /// Namespaced key of the storage slot holding the consent record.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Analytics measurement ID; the opt-out flag name is derived from it.
    #[serde(default = "default_tracking_id")]
    pub tracking_id: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.into()
}
fn default_tracking_id() -> String {
    DEFAULT_TRACKING_ID.into()
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            tracking_id: DEFAULT_TRACKING_ID.into(),
        }
    }
}

impl ConsentConfig {
    /// Name of the process-wide flag that disables analytics when `true`.
    pub fn analytics_disable_flag(&self) -> String {
        format!("{}{}", DISABLE_FLAG_PREFIX, self.tracking_id)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ConsentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file, or return defaults.
    pub fn load(path: &Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring consent config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::Config("storageKey must not be empty".into()));
        }
        if self.tracking_id.trim().is_empty() {
            return Err(Error::Config("trackingId must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_flag_name() {
        let config = ConsentConfig::default();
        assert_eq!(config.analytics_disable_flag(), "ga-disable-G-80XZVYXSQX");
        assert_eq!(config.storage_key, "fluidcast-cookie-consent");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ConsentConfig::from_json(r#"{"trackingId":"G-TEST"}"#).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.analytics_disable_flag(), "ga-disable-G-TEST");
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = ConsentConfig::from_json(r#"{"storageKey":"  "}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = ConsentConfig::load(&dir.path().join("consent.json"));
        assert_eq!(config, ConsentConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("consent.json");
        std::fs::write(&path, r#"{"storageKey":"site-consent","trackingId":"G-1"}"#).unwrap();

        let config = ConsentConfig::load(&path);
        assert_eq!(config.storage_key, "site-consent");
        assert_eq!(config.tracking_id, "G-1");
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("consent.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(ConsentConfig::load(&path), ConsentConfig::default());
    }
}
