use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::event::Event;
use crate::domain::slot::Slot;

/// Read-only snapshot of one conversation, as sent by the dialogue host.
///
/// Only the fields the concierge actions consult are modeled; anything else in
/// the payload is ignored. The host may send `null` for any collection, which is
/// read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_message: LatestMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Value>,
    #[serde(default)]
    pub active_loop: Option<ActiveLoop>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Entity>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
}

impl Entity {
    pub fn new(entity: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { entity: entity.into(), value: value.into(), start: None, end: None, extractor: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveLoop {
    #[serde(default)]
    pub name: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Tracker {
    /// Current value of a slot; `null` and missing slots are both `None`.
    pub fn slot(&self, slot: Slot) -> Option<&Value> {
        self.slots.get(slot.name()).filter(|value| !value.is_null())
    }

    pub fn slot_str(&self, slot: Slot) -> Option<&str> {
        self.slot(slot).and_then(Value::as_str)
    }

    pub fn latest_intent_name(&self) -> Option<&str> {
        self.latest_message
            .intent
            .as_ref()
            .and_then(|intent| intent.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Values of every entity of `entity_type` in the latest message, in order.
    pub fn latest_entity_values<'a>(
        &'a self,
        entity_type: &'a str,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.latest_message
            .entities
            .iter()
            .filter(move |entity| entity.entity == entity_type)
            .map(|entity| &entity.value)
    }

    pub fn active_loop_name(&self) -> Option<&str> {
        self.active_loop.as_ref().and_then(|active| active.name.as_deref())
    }

    /// Slot candidates awaiting validation.
    ///
    /// The host appends a form's candidate values as a trailing run of slot
    /// events; the run ends at the first non-slot event from the back. A slot
    /// repeated inside the run keeps its most recent value and its first position.
    pub fn slots_to_validate(&self) -> Vec<(String, Value)> {
        let trailing = self
            .events
            .iter()
            .rev()
            .map_while(Event::from_tracker_event)
            .collect::<Vec<_>>();

        let mut candidates: Vec<(String, Value)> = Vec::with_capacity(trailing.len());
        for event in trailing.into_iter().rev() {
            let name = event.slot_name().to_string();
            let value = event.slot_value().clone();
            match candidates.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = value,
                None => candidates.push((name, value)),
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Tracker;
    use crate::domain::slot::Slot;

    fn tracker(value: serde_json::Value) -> Tracker {
        serde_json::from_value(value).expect("tracker should deserialize")
    }

    #[test]
    fn null_collections_deserialize_as_empty() {
        let tracker = tracker(json!({
            "sender_id": "student-42",
            "slots": null,
            "latest_message": null,
            "events": null,
            "paused": false
        }));

        assert_eq!(tracker.sender_id, "student-42");
        assert!(tracker.slots.is_empty());
        assert!(tracker.events.is_empty());
        assert!(tracker.latest_message.entities.is_empty());
        assert_eq!(tracker.latest_intent_name(), None);
    }

    #[test]
    fn null_slots_read_as_unset() {
        let tracker = tracker(json!({
            "slots": {"cuisine": null, "outdoor_seating": false, "context_location": "bank"}
        }));

        assert_eq!(tracker.slot(Slot::Cuisine), None);
        assert_eq!(tracker.slot(Slot::OutdoorSeating), Some(&json!(false)));
        assert_eq!(tracker.slot_str(Slot::ContextLocation), Some("bank"));
        assert_eq!(tracker.slot(Slot::Feedback), None);
    }

    #[test]
    fn entity_values_are_filtered_by_type() {
        let tracker = tracker(json!({
            "latest_message": {
                "text": "when do amul and the bank open",
                "intent": {"name": "ask_time", "confidence": 0.97},
                "entities": [
                    {"entity": "Location", "value": "amul", "start": 13, "end": 17},
                    {"entity": "Department", "value": "civil"},
                    {"entity": "Location", "value": "bank"}
                ]
            }
        }));

        let locations = tracker.latest_entity_values("Location").collect::<Vec<_>>();
        assert_eq!(locations, vec![&json!("amul"), &json!("bank")]);
        assert_eq!(tracker.latest_intent_name(), Some("ask_time"));
    }

    #[test]
    fn slots_to_validate_reads_only_the_trailing_slot_run() {
        let tracker = tracker(json!({
            "events": [
                {"event": "slot", "name": "feedback", "value": "great"},
                {"event": "user", "text": "italian for 4, outside"},
                {"event": "slot", "name": "cuisine", "value": "Italian"},
                {"event": "slot", "name": "number_for_restaurant", "value": "4"},
                {"event": "slot", "name": "cuisine", "value": "italian"}
            ]
        }));

        assert_eq!(
            tracker.slots_to_validate(),
            vec![
                ("cuisine".to_string(), json!("italian")),
                ("number_for_restaurant".to_string(), json!("4")),
            ]
        );
    }

    #[test]
    fn slots_to_validate_is_empty_after_a_non_slot_event() {
        let tracker = tracker(json!({
            "events": [
                {"event": "slot", "name": "cuisine", "value": "italian"},
                {"event": "action", "name": "action_listen"}
            ]
        }));

        assert!(tracker.slots_to_validate().is_empty());
    }
}
