use async_trait::async_trait;
use concierge_core::validation::{MAX_PARTY_SIZE, MIN_PARTY_SIZE};
use concierge_core::{Cuisine, Dispatcher, Event, Slot, Tracker};
use serde_json::Value;

use crate::registry::Action;

pub const DETAILS_ENTITY: &str = "restaurant_form_details";

/// Explains what the restaurant form accepts.
///
/// An explicit `restaurant_form_details` entity (`cuisine` or `people`) picks
/// the topic; otherwise the first unfilled form slot does.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnFormDetails;

#[async_trait]
impl Action for ReturnFormDetails {
    fn name(&self) -> &'static str {
        "return_form_details"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<Event> {
        let requested = tracker.latest_entity_values(DETAILS_ENTITY).next();

        let topic = match requested {
            Some(Value::String(detail)) if detail == "cuisine" => Some(Slot::Cuisine),
            Some(Value::String(detail)) if detail == "people" => Some(Slot::NumberForRestaurant),
            Some(_) => None,
            None => Slot::RESTAURANT_FORM.into_iter().find(|slot| tracker.slot(*slot).is_none()),
        };

        if let Some(slot) = topic {
            explain(slot, dispatcher);
        }
        Vec::new()
    }
}

fn explain(slot: Slot, dispatcher: &mut Dispatcher) {
    match slot {
        Slot::Cuisine => {
            dispatcher.utter_text("Available cuisines are");
            dispatcher.utter_text(Cuisine::supported_list());
        }
        Slot::NumberForRestaurant => dispatcher.utter_text(format!(
            "Number of people can range from {MIN_PARTY_SIZE} to {MAX_PARTY_SIZE}"
        )),
        Slot::OutdoorSeating => dispatcher.utter_text(
            "Enter yes if you want to sit outside or no if you want to sit inside",
        ),
        Slot::ContextLocation | Slot::Preferences | Slot::Feedback => {}
    }
}
