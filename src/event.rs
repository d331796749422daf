//! Event envelope types shared by the capture pipeline and the panels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single event as dispatched by the host application.
///
/// The host owns this shape; the panels carry it through unchanged. On the
/// wire the timestamp is an integer count of milliseconds since the epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    /// Namespaced event type, colon-separated (e.g. "panel:toggle")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Identifier of the emitter
    pub source: String,
    /// Emission time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Arbitrary structured data attached by the emitter
    #[serde(default)]
    pub payload: Value,
}

impl EventRecord {
    /// Create a record stamped with the current time
    pub fn new(event_type: impl Into<String>, source: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            source: source.into(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Create a record with an explicit timestamp
    pub fn with_timestamp(
        event_type: impl Into<String>,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
        payload: Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            source: source.into(),
            timestamp,
            payload,
        }
    }

    /// Namespace prefix of the event type (the part before the first ':')
    pub fn namespace(&self) -> &str {
        self.event_type.split(':').next().unwrap_or("")
    }
}

/// A record retained by the capture buffer, tagged with its capture id
///
/// Ids increase monotonically with insertion order, are unique within a
/// buffer's lifetime, and are never reused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapturedEvent {
    /// Capture sequence id, assigned at append time
    pub id: u64,
    /// The event as the host dispatched it
    pub record: EventRecord,
}
