//! Consent record — the single persisted decision.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Tracking categories a visitor can consent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    Analytics,
    Marketing,
}

impl ConsentCategory {
    pub fn all() -> &'static [ConsentCategory] {
        &[Self::Analytics, Self::Marketing]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Marketing => "marketing",
        }
    }
}

impl std::fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A complete consent decision.
///
/// Every field is required on deserialization: a stored value missing any of
/// them fails to parse rather than producing a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub analytics: bool,
    pub marketing: bool,
    /// ISO-8601 UTC time of the decision, millisecond precision.
    pub timestamp: String,
}

impl ConsentRecord {
    /// Build a record stamped with the current time.
    pub fn new(analytics: bool, marketing: bool) -> Self {
        Self {
            analytics,
            marketing,
            timestamp: now_iso8601(),
        }
    }

    pub fn accept_all() -> Self {
        Self::new(true, true)
    }

    pub fn reject_all() -> Self {
        Self::new(false, false)
    }

    /// Whether this decision permits tracking in `category`.
    pub fn allows(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
        }
    }
}

/// Current time in the `YYYY-MM-DDTHH:MM:SS.sssZ` shape browsers produce.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_and_reject_flags() {
        let accepted = ConsentRecord::accept_all();
        assert!(accepted.analytics && accepted.marketing);

        let rejected = ConsentRecord::reject_all();
        assert!(!rejected.analytics && !rejected.marketing);
    }

    #[test]
    fn test_timestamp_shape() {
        let record = ConsentRecord::new(true, false);
        assert_eq!(record.timestamp.len(), "2026-10-18T09:30:00.000Z".len());
        assert!(record.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }

    #[test]
    fn test_allows_category() {
        let record = ConsentRecord::new(false, true);
        assert!(!record.allows(ConsentCategory::Analytics));
        assert!(record.allows(ConsentCategory::Marketing));
    }

    #[test]
    fn test_json_field_names() {
        let record = ConsentRecord {
            analytics: true,
            marketing: false,
            timestamp: "2024-03-01T12:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["analytics"], true);
        assert_eq!(json["marketing"], false);
        assert_eq!(json["timestamp"], "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_partial_record_rejected() {
        let partial = r#"{"analytics":true,"timestamp":"2024-03-01T12:00:00.000Z"}"#;
        assert!(serde_json::from_str::<ConsentRecord>(partial).is_err());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let stored = r#"{"analytics":false,"marketing":true,"timestamp":"t","version":2}"#;
        let record: ConsentRecord = serde_json::from_str(stored).unwrap();
        assert!(!record.analytics);
        assert!(record.marketing);
    }
}
