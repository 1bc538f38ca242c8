use async_trait::async_trait;
use concierge_core::lookup::{
    LookupTable, CONTEXT_OPENING_HOURS, CONTEXT_WHEREABOUTS, DEPARTMENTS, OPENING_HOURS,
    WHEREABOUTS,
};
use concierge_core::{Dispatcher, Event, Resolution, Slot, Tracker};
use serde_json::Value;
use tracing::debug;

use crate::registry::Action;

/// Answers from a table keyed by one entity type of the latest message.
#[derive(Clone, Copy, Debug)]
pub struct EntityLookup {
    name: &'static str,
    entity_type: &'static str,
    table: LookupTable,
}

impl EntityLookup {
    pub const fn new(name: &'static str, entity_type: &'static str, table: LookupTable) -> Self {
        Self { name, entity_type, table }
    }

    pub const fn direct_time_query() -> Self {
        Self::new("direct_time_query", "Location", OPENING_HOURS)
    }

    pub const fn direct_location_query() -> Self {
        Self::new("direct_location_query", "Location", WHEREABOUTS)
    }

    pub const fn department_query() -> Self {
        Self::new("department_query", "Department", DEPARTMENTS)
    }

    pub fn resolve(&self, tracker: &Tracker) -> Resolution {
        let candidates =
            tracker.latest_entity_values(self.entity_type).map(entity_text).collect::<Vec<_>>();
        let candidates = candidates.iter().map(String::as_str).collect::<Vec<_>>();
        self.table.resolve_single(&candidates)
    }
}

#[async_trait]
impl Action for EntityLookup {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<Event> {
        let resolution = self.resolve(tracker);
        log_resolution(self.name, self.table, &resolution);
        dispatcher.utter_response(resolution.response_key());
        Vec::new()
    }
}

/// Answers from a table keyed by the `context_location` slot.
#[derive(Clone, Copy, Debug)]
pub struct ContextLookup {
    name: &'static str,
    table: LookupTable,
}

impl ContextLookup {
    pub const fn new(name: &'static str, table: LookupTable) -> Self {
        Self { name, table }
    }

    pub const fn indirect_time_query() -> Self {
        Self::new("indirect_time_query", CONTEXT_OPENING_HOURS)
    }

    pub const fn indirect_location_query() -> Self {
        Self::new("indirect_location_query", CONTEXT_WHEREABOUTS)
    }

    pub fn resolve(&self, tracker: &Tracker) -> Resolution {
        let stored = tracker
            .slot(Slot::ContextLocation)
            .map(entity_text)
            .filter(|location| !location.is_empty());

        match stored {
            Some(location) => self.table.resolve(&location),
            None => self.table.resolve_single(&[]),
        }
    }
}

#[async_trait]
impl Action for ContextLookup {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<Event> {
        let resolution = self.resolve(tracker);
        log_resolution(self.name, self.table, &resolution);
        dispatcher.utter_response(resolution.response_key());
        Vec::new()
    }
}

fn entity_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn log_resolution(action_name: &str, table: LookupTable, resolution: &Resolution) {
    match resolution {
        Resolution::Matched(key) => debug!(
            event_name = "actions.lookup.matched",
            action_name,
            table = table.name(),
            response = key.as_str(),
            "lookup matched"
        ),
        Resolution::Missed(miss) => debug!(
            event_name = "actions.lookup.missed",
            action_name,
            table = table.name(),
            miss = ?miss,
            "lookup fell back to default response"
        ),
    }
}
