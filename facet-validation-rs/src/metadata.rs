//! Pass-through metadata overrides
//!
//! Provenance fields are assigned by the caller, not validated. They are
//! applied to the raw record before validation.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::registry::{DEFAULT_SOURCE, FACET_MODEL, SESSION_ID, SOURCE, TIMESTAMP};

/// Metadata to stamp onto a record
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataOverrides {
    /// Explicit session identifier; replaces any existing value unless empty
    pub session_id: Option<String>,
    /// Model that produced the facet; ignored when empty
    pub facet_model: Option<String>,
    /// Provenance label, always written
    pub source: String,
    /// Assign a random UUID when the record has no `session_id`
    pub generate_session_id: bool,
    /// Assign the current UTC time when the record has no `timestamp`
    pub stamp_timestamp: bool,
}

impl Default for MetadataOverrides {
    fn default() -> Self {
        Self {
            session_id: None,
            facet_model: None,
            source: DEFAULT_SOURCE.to_string(),
            generate_session_id: false,
            stamp_timestamp: false,
        }
    }
}

impl MetadataOverrides {
    pub fn apply(&self, record: &mut Map<String, Value>) {
        if let Some(session_id) = non_empty(&self.session_id) {
            record.insert(SESSION_ID.to_string(), Value::from(session_id));
        } else if self.generate_session_id && !has_value(record, SESSION_ID) {
            let generated = Uuid::new_v4().to_string();
            tracing::debug!(session_id = %generated, "Generated session id");
            record.insert(SESSION_ID.to_string(), Value::from(generated));
        }

        if let Some(model) = non_empty(&self.facet_model) {
            record.insert(FACET_MODEL.to_string(), Value::from(model));
        }

        record.insert(SOURCE.to_string(), Value::from(self.source.as_str()));

        if self.stamp_timestamp && !has_value(record, TIMESTAMP) {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            record.insert(TIMESTAMP.to_string(), Value::from(now));
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn has_value(record: &Map<String, Value>, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_default_source_always_written() {
        let mut record = object(json!({"source": "upstream"}));
        MetadataOverrides::default().apply(&mut record);
        assert_eq!(record["source"], "self-improve");
        assert!(!record.contains_key("session_id"));
        assert!(!record.contains_key("timestamp"));
    }

    #[test]
    fn test_explicit_values_override() {
        let mut record = object(json!({"session_id": "old", "facet_model": "haiku"}));
        let overrides = MetadataOverrides {
            session_id: Some("ABC".to_string()),
            facet_model: Some("sonnet".to_string()),
            source: "batch".to_string(),
            generate_session_id: true,
            stamp_timestamp: false,
        };
        overrides.apply(&mut record);
        assert_eq!(record["session_id"], "ABC");
        assert_eq!(record["facet_model"], "sonnet");
        assert_eq!(record["source"], "batch");
    }

    #[test]
    fn test_empty_overrides_are_skipped() {
        let mut record = object(json!({"session_id": "existing"}));
        let overrides = MetadataOverrides {
            session_id: Some(String::new()),
            facet_model: Some(String::new()),
            ..Default::default()
        };
        overrides.apply(&mut record);
        assert_eq!(record["session_id"], "existing");
        assert!(!record.contains_key("facet_model"));

        let mut fresh = Map::new();
        let generating = MetadataOverrides {
            session_id: Some(String::new()),
            generate_session_id: true,
            ..Default::default()
        };
        generating.apply(&mut fresh);
        assert!(Uuid::parse_str(fresh["session_id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_generated_session_id_only_when_missing() {
        let overrides = MetadataOverrides {
            generate_session_id: true,
            ..Default::default()
        };

        let mut fresh = Map::new();
        overrides.apply(&mut fresh);
        let generated = fresh["session_id"].as_str().unwrap();
        assert!(Uuid::parse_str(generated).is_ok());

        let mut existing = object(json!({"session_id": "keep-me"}));
        overrides.apply(&mut existing);
        assert_eq!(existing["session_id"], "keep-me");
    }

    #[test]
    fn test_timestamp_stamped_only_when_missing() {
        let overrides = MetadataOverrides {
            stamp_timestamp: true,
            ..Default::default()
        };

        let mut fresh = Map::new();
        overrides.apply(&mut fresh);
        let stamp = fresh["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());

        let mut existing = object(json!({"timestamp": "2025-01-01T00:00:00Z"}));
        overrides.apply(&mut existing);
        assert_eq!(existing["timestamp"], "2025-01-01T00:00:00Z");
    }
}
