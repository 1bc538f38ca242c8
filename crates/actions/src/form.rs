use async_trait::async_trait;
use concierge_core::validation::{self, ValidatedSlot};
use concierge_core::{Dispatcher, Event, Slot, Tracker};
use serde_json::Value;
use tracing::debug;

use crate::registry::Action;

/// Validates the restaurant form's slot candidates.
///
/// Candidates come from [`Tracker::slots_to_validate`]. Each one is run through
/// its slot's validator and written back, accepted or unset; a rejected
/// candidate also queues exactly one rejection response. Candidates for slots
/// without a validator, and `null` candidates, are written back unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateRestaurantForm;

#[async_trait]
impl Action for ValidateRestaurantForm {
    fn name(&self) -> &'static str {
        "validate_restaurant_form"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<Event> {
        tracker
            .slots_to_validate()
            .into_iter()
            .map(|(name, candidate)| validate_candidate(name, candidate, dispatcher))
            .collect()
    }
}

fn validate_candidate(name: String, candidate: Value, dispatcher: &mut Dispatcher) -> Event {
    if candidate.is_null() {
        return Event::SlotSet { timestamp: None, name, value: candidate };
    }

    let validated = Slot::from_name(&name).and_then(|slot| validation::validate(slot, &candidate));
    let Some(ValidatedSlot { slot, value, rejection }) = validated else {
        return Event::SlotSet { timestamp: None, name, value: candidate };
    };

    if let Some(rejection) = rejection {
        debug!(
            event_name = "actions.form.slot_rejected",
            slot = %slot,
            signal = rejection.signal(),
            "slot candidate rejected"
        );
        dispatcher.utter_response(rejection.response_key());
    }

    Event::slot_set(slot, value)
}
