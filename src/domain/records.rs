//! Record types flowing through the anonymization engine and the audit ledger

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw personal record
///
/// `age`, `gender` and `zip_code` are quasi-identifiers; `disease` is the
/// sensitive attribute that anonymization carries through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    pub age: u32,
    pub gender: String,
    pub zip_code: String,
    pub disease: String,
}

impl PersonalData {
    /// Creates a new personal record
    pub fn new(
        age: u32,
        gender: impl Into<String>,
        zip_code: impl Into<String>,
        disease: impl Into<String>,
    ) -> Self {
        Self {
            age,
            gender: gender.into(),
            zip_code: zip_code.into(),
            disease: disease.into(),
        }
    }
}

/// Output of k-anonymity grouping, one per released source record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedData {
    /// Equivalence class number, sequential from 1 in generalized-key order
    pub group_id: u32,

    /// Generalized quasi-identifiers (`age`, `gender`, `zip`)
    pub generalized_attributes: BTreeMap<String, String>,

    /// Sensitive attribute, unmodified
    pub sensitive_value: String,
}

/// Labelled numeric statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericData {
    pub label: String,
    pub value: f64,
}

impl NumericData {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Immutable audit ledger entry
///
/// Serialized with the field names of the signed export format:
/// `{"timestamp": .., "eventType": .., "details": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEvent {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub event_type: String,
    pub details: String,
}

impl AccessEvent {
    pub fn new(timestamp: i64, event_type: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            timestamp,
            event_type: event_type.into(),
            details: details.into(),
        }
    }

    /// Event time as a UTC date, `None` if the timestamp is out of range
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.recorded_at() {
            Some(at) => write!(
                f,
                "[{}] {} - {}",
                at.to_rfc3339_opts(SecondsFormat::Millis, true),
                self.event_type,
                self.details
            ),
            None => write!(f, "[{}] {} - {}", self.timestamp, self.event_type, self.details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_event_wire_names() {
        let event = AccessEvent::new(1_700_000_000_000, "AUTH", "granted");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":1700000000000,"eventType":"AUTH","details":"granted"}"#
        );
    }

    #[test]
    fn test_access_event_display() {
        let event = AccessEvent::new(0, "DATA_ACCESS", "logs viewed");
        assert_eq!(
            event.to_string(),
            "[1970-01-01T00:00:00.000Z] DATA_ACCESS - logs viewed"
        );
    }

    #[test]
    fn test_personal_data_roundtrip_fields() {
        let record = PersonalData::new(34, "F", "28013", "flu");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["zip_code"], "28013");
        assert_eq!(json["disease"], "flu");
    }
}
