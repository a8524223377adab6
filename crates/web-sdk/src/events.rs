//! Incoming event envelope, as delivered by the tag manager.

use branch_core::{EventKind, Payload};
use branch_ecommerce::value::stringify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single event routed to the component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub payload: Payload,
    #[serde(default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl McEvent {
    pub fn new(kind: EventKind, payload: Payload) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            payload,
            received_at: Utc::now(),
        }
    }

    /// Build an event from a JSON object literal. Non-object values yield an
    /// empty payload.
    pub fn from_json(kind: EventKind, payload: Value) -> Self {
        match payload {
            Value::Object(map) => Self::new(kind, map),
            _ => Self::new(kind, Payload::new()),
        }
    }

    /// Payload field as form text. `None` when missing or `null`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.payload.get(key)? {
            Value::Null => None,
            value => Some(stringify(value)),
        }
    }

    /// Payload without the listed keys.
    pub fn payload_without(&self, keys: &[&str]) -> Payload {
        self.payload
            .iter()
            .filter(|(key, _)| !keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
