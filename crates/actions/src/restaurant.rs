use async_trait::async_trait;
use concierge_core::restaurants::CATALOG;
use concierge_core::{
    Dispatcher, Event, ResponseKey, RestaurantQuery, RestaurantRecord, Slot, Tracker,
};
use serde_json::Value;
use tracing::debug;

use crate::registry::Action;

pub const PARAMETERS_RESPONSE: ResponseKey = ResponseKey("utter_parameters_values");
pub const FOUND_RESPONSE: ResponseKey = ResponseKey("utter_found_restaurants");

/// Lists catalogued restaurants matching the collected form slots, then clears
/// the search slots so the next request starts fresh.
#[derive(Clone, Copy, Debug)]
pub struct FindRestaurant {
    catalog: &'static [RestaurantRecord],
}

impl Default for FindRestaurant {
    fn default() -> Self {
        Self { catalog: &CATALOG }
    }
}

#[cfg(test)]
impl FindRestaurant {
    fn with_catalog(catalog: &'static [RestaurantRecord]) -> Self {
        Self { catalog }
    }
}

/// Builds the catalog query from tracker slots.
///
/// Party size, preferences and feedback are collected by the form but do not
/// narrow the search.
pub fn query_from_slots(tracker: &Tracker) -> RestaurantQuery {
    RestaurantQuery {
        cuisine: tracker.slot(Slot::Cuisine).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }),
        outdoor_seating: tracker.slot(Slot::OutdoorSeating).and_then(Value::as_bool),
    }
}

#[async_trait]
impl Action for FindRestaurant {
    fn name(&self) -> &'static str {
        "find_restaurant"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<Event> {
        let query = query_from_slots(tracker);
        dispatcher.utter_response(PARAMETERS_RESPONSE);

        let matches = query.filter(self.catalog);
        debug!(
            event_name = "actions.restaurant.searched",
            sender_id = %tracker.sender_id,
            cuisine = query.cuisine.as_deref().unwrap_or("<any>"),
            outdoor_seating = ?query.outdoor_seating,
            party_size = ?tracker.slot(Slot::NumberForRestaurant),
            match_count = matches.len(),
            "restaurant search completed"
        );

        if !matches.is_empty() {
            dispatcher.utter_response(FOUND_RESPONSE);
            for record in matches {
                dispatcher.utter_text(record.name);
            }
        }

        Slot::RESTAURANT_SEARCH.into_iter().map(Event::slot_unset).collect()
    }
}
