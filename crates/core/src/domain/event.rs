use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::slot::Slot;

/// Tracker events an action hands back to the dialogue host.
///
/// Serialized in the host's wire shape, e.g.
/// `{"event": "slot", "timestamp": null, "name": "cuisine", "value": "italian"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "slot")]
    SlotSet {
        #[serde(default)]
        timestamp: Option<f64>,
        name: String,
        #[serde(default)]
        value: Value,
    },
}

impl Event {
    pub fn slot_set(slot: Slot, value: impl Into<Value>) -> Self {
        Self::SlotSet { timestamp: None, name: slot.name().to_string(), value: value.into() }
    }

    /// A `null` slot value, which the host reads as "ask again".
    pub fn slot_unset(slot: Slot) -> Self {
        Self::slot_set(slot, Value::Null)
    }

    /// Parses a raw tracker event, returning `None` for anything that is not a slot event.
    pub fn from_tracker_event(raw: &Value) -> Option<Self> {
        if raw.get("event").and_then(Value::as_str) != Some("slot") {
            return None;
        }
        serde_json::from_value(raw.clone()).ok()
    }

    pub fn slot_name(&self) -> &str {
        match self {
            Self::SlotSet { name, .. } => name,
        }
    }

    pub fn slot_value(&self) -> &Value {
        match self {
            Self::SlotSet { value, .. } => value,
        }
    }
}
