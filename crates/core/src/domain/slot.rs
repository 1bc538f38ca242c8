use serde::{Deserialize, Serialize};

/// Conversation slots read or written by the concierge actions.
///
/// Slot values themselves live in the host's tracker; this enum only pins the
/// names so actions never spell them by hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Cuisine,
    NumberForRestaurant,
    OutdoorSeating,
    ContextLocation,
    Preferences,
    Feedback,
}

impl Slot {
    /// Slots collected by the restaurant form, in the order they are asked for.
    pub const RESTAURANT_FORM: [Slot; 3] =
        [Slot::Cuisine, Slot::NumberForRestaurant, Slot::OutdoorSeating];

    /// Slots cleared once a restaurant search has been answered.
    pub const RESTAURANT_SEARCH: [Slot; 5] = [
        Slot::Cuisine,
        Slot::NumberForRestaurant,
        Slot::OutdoorSeating,
        Slot::Preferences,
        Slot::Feedback,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Cuisine => "cuisine",
            Self::NumberForRestaurant => "number_for_restaurant",
            Self::OutdoorSeating => "outdoor_seating",
            Self::ContextLocation => "context_location",
            Self::Preferences => "preferences",
            Self::Feedback => "feedback",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cuisine" => Some(Self::Cuisine),
            "number_for_restaurant" => Some(Self::NumberForRestaurant),
            "outdoor_seating" => Some(Self::OutdoorSeating),
            "context_location" => Some(Self::ContextLocation),
            "preferences" => Some(Self::Preferences),
            "feedback" => Some(Self::Feedback),
            _ => None,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
