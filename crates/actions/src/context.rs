use async_trait::async_trait;
use concierge_core::{Dispatcher, Event, Slot, Tracker};
use serde_json::Value;
use tracing::debug;

use crate::registry::Action;

/// Remembers the place being talked about.
///
/// The latest intent's name (e.g. `bank`, `printing`) overwrites
/// `context_location`, so a follow-up like "when does it close?" can be
/// answered by the indirect lookups.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetContextLocation;

#[async_trait]
impl Action for SetContextLocation {
    fn name(&self) -> &'static str {
        "set_context_location"
    }

    async fn run(&self, tracker: &Tracker, _dispatcher: &mut Dispatcher) -> Vec<Event> {
        let intent = tracker.latest_intent_name();
        debug!(
            event_name = "actions.context.location_set",
            sender_id = %tracker.sender_id,
            context_location = intent.unwrap_or("<unset>"),
            "conversation context updated"
        );

        let value = intent.map_or(Value::Null, Value::from);
        vec![Event::slot_set(Slot::ContextLocation, value)]
    }
}
