//! Restaurant form validators.
//!
//! Each validator takes the raw candidate the host extracted for a slot and
//! either accepts a normalized value or rejects it with the response key the
//! user should hear. A rejected slot is always written back as unset so the
//! form asks for it again; nothing partially validated ever reaches the tracker.

use serde_json::Value;

use crate::domain::cuisine::Cuisine;
use crate::domain::response::ResponseKey;
use crate::domain::slot::Slot;

pub const MIN_PARTY_SIZE: i64 = 1;
pub const MAX_PARTY_SIZE: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    WrongCuisine,
    WrongNumPeople,
    MoreNumOfPeople,
    WrongOutdoorSeating,
}

impl Rejection {
    pub const fn signal(self) -> &'static str {
        match self {
            Self::WrongCuisine => "wrong_cuisine",
            Self::WrongNumPeople => "wrong_num_people",
            Self::MoreNumOfPeople => "more_num_of_people",
            Self::WrongOutdoorSeating => "wrong_outdoor_seating",
        }
    }

    pub const fn response_key(self) -> ResponseKey {
        match self {
            Self::WrongCuisine => ResponseKey("utter_wrong_cuisine"),
            Self::WrongNumPeople => ResponseKey("utter_wrong_num_people"),
            Self::MoreNumOfPeople => ResponseKey("utter_more_num_of_people"),
            Self::WrongOutdoorSeating => ResponseKey("utter_wrong_outdoor_seating"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotValidation<T> {
    Accepted(T),
    Rejected(Rejection),
}

/// A candidate after validation: the value to write back and, if the candidate
/// was refused, why.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSlot {
    pub slot: Slot,
    pub value: Value,
    pub rejection: Option<Rejection>,
}

impl ValidatedSlot {
    fn from_validation<T>(slot: Slot, validation: SlotValidation<T>) -> Self
    where
        T: Into<Value>,
    {
        match validation {
            SlotValidation::Accepted(value) => Self { slot, value: value.into(), rejection: None },
            SlotValidation::Rejected(rejection) => {
                Self { slot, value: Value::Null, rejection: Some(rejection) }
            }
        }
    }
}

/// Runs the validator registered for `slot`, or returns `None` if the slot has none.
pub fn validate(slot: Slot, candidate: &Value) -> Option<ValidatedSlot> {
    let validated = match slot {
        Slot::Cuisine => ValidatedSlot::from_validation(
            slot,
            match validate_cuisine(candidate) {
                SlotValidation::Accepted(cuisine) => SlotValidation::Accepted(cuisine.as_str()),
                SlotValidation::Rejected(rejection) => SlotValidation::Rejected(rejection),
            },
        ),
        Slot::NumberForRestaurant => {
            ValidatedSlot::from_validation(slot, validate_party_size(candidate))
        }
        Slot::OutdoorSeating => {
            ValidatedSlot::from_validation(slot, validate_outdoor_seating(candidate))
        }
        Slot::ContextLocation | Slot::Preferences | Slot::Feedback => return None,
    };
    Some(validated)
}

pub fn validate_cuisine(candidate: &Value) -> SlotValidation<Cuisine> {
    candidate
        .as_str()
        .and_then(|raw| Cuisine::from_normalized(&raw.to_lowercase()))
        .map_or(SlotValidation::Rejected(Rejection::WrongCuisine), SlotValidation::Accepted)
}

/// Party size must be a whole number in `1..=10`.
///
/// Text is trimmed before parsing; JSON numbers are accepted when integral.
pub fn validate_party_size(candidate: &Value) -> SlotValidation<u8> {
    let Some(parsed) = parse_whole_number(candidate) else {
        return SlotValidation::Rejected(Rejection::WrongNumPeople);
    };

    if parsed < MIN_PARTY_SIZE {
        return SlotValidation::Rejected(Rejection::WrongNumPeople);
    }
    if parsed > MAX_PARTY_SIZE {
        return SlotValidation::Rejected(Rejection::MoreNumOfPeople);
    }

    u8::try_from(parsed)
        .map_or(SlotValidation::Rejected(Rejection::WrongNumPeople), SlotValidation::Accepted)
}

/// Text mentioning "out" means outdoor, else "in" means indoor. Booleans from
/// an affirm/deny mapping pass through untouched. Matching is case-sensitive.
pub fn validate_outdoor_seating(candidate: &Value) -> SlotValidation<bool> {
    match candidate {
        Value::Bool(flag) => SlotValidation::Accepted(*flag),
        Value::String(text) if text.contains("out") => SlotValidation::Accepted(true),
        Value::String(text) if text.contains("in") => SlotValidation::Accepted(false),
        _ => SlotValidation::Rejected(Rejection::WrongOutdoorSeating),
    }
}

fn parse_whole_number(candidate: &Value) -> Option<i64> {
    match candidate {
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| saturate_oversized(text))
        }
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX))
            // `as` saturates, so integral floats beyond i64 still count as oversized.
            .or_else(|| number.as_f64().filter(|float| float.fract() == 0.0).map(|float| float as i64)),
        _ => None,
    }
}

/// Digit strings too long for i64 still carry a sign, which decides the rejection.
fn saturate_oversized(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    (!digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
        .then_some(if negative { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{
        validate, validate_cuisine, validate_outdoor_seating, validate_party_size, Rejection,
        SlotValidation,
    };
    use crate::domain::cuisine::Cuisine;
    use crate::domain::slot::Slot;

    #[test]
    fn cuisine_is_lower_cased_before_membership_check() {
        assert_eq!(
            validate_cuisine(&json!("North Indian")),
            SlotValidation::Accepted(Cuisine::NorthIndian)
        );
        assert_eq!(
            validate_cuisine(&json!("ASSAMESE")),
            SlotValidation::Accepted(Cuisine::Assamese)
        );
    }

    #[test]
    fn every_supported_cuisine_is_accepted_in_lower_case() {
        for cuisine in Cuisine::ALL {
            let validated =
                validate(Slot::Cuisine, &json!(cuisine.as_str().to_uppercase())).expect("validator");
            assert_eq!(validated.value, json!(cuisine.as_str()));
            assert_eq!(validated.rejection, None);
        }
    }

    #[test]
    fn unknown_cuisine_is_rejected_and_unset() {
        let validated = validate(Slot::Cuisine, &json!("thai")).expect("validator");

        assert_eq!(validated.value, Value::Null);
        assert_eq!(validated.rejection, Some(Rejection::WrongCuisine));
        assert_eq!(Rejection::WrongCuisine.response_key().as_str(), "utter_wrong_cuisine");
        assert_eq!(validate_cuisine(&json!(7)), SlotValidation::Rejected(Rejection::WrongCuisine));
    }

    #[test]
    fn party_size_boundaries() {
        let cases = [
            (json!("1"), SlotValidation::Accepted(1)),
            (json!(" 10 "), SlotValidation::Accepted(10)),
            (json!(4), SlotValidation::Accepted(4)),
            (json!(6.0), SlotValidation::Accepted(6)),
            (json!("0"), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!("-3"), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!("11"), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!(250), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!("four"), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!("2.5"), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!(2.5), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!(true), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!("99999999999999999999"), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!("+99999999999999999999"), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!("-99999999999999999999"), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!(10_000_000_000_000_000_000u64), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!(1e15), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!(1e30), SlotValidation::Rejected(Rejection::MoreNumOfPeople)),
            (json!(-1e30), SlotValidation::Rejected(Rejection::WrongNumPeople)),
            (json!("-"), SlotValidation::Rejected(Rejection::WrongNumPeople)),
        ];

        for (candidate, expected) in cases {
            assert_eq!(validate_party_size(&candidate), expected, "candidate {candidate}");
        }
    }

    #[test]
    fn accepted_party_size_is_written_as_a_number() {
        let validated = validate(Slot::NumberForRestaurant, &json!("7")).expect("validator");
        assert_eq!(validated.value, json!(7));
    }

    #[test]
    fn outdoor_seating_text_and_boolean_passthrough() {
        assert_eq!(validate_outdoor_seating(&json!("outside")), SlotValidation::Accepted(true));
        assert_eq!(validate_outdoor_seating(&json!("inside")), SlotValidation::Accepted(false));
        assert_eq!(validate_outdoor_seating(&json!("indoors please")), SlotValidation::Accepted(false));
        assert_eq!(validate_outdoor_seating(&json!(true)), SlotValidation::Accepted(true));
        assert_eq!(validate_outdoor_seating(&json!(false)), SlotValidation::Accepted(false));
    }

    #[test]
    fn outdoor_takes_precedence_over_indoor_substring() {
        // "outdoor dining" contains both "out" and "in"
        assert_eq!(
            validate_outdoor_seating(&json!("outdoor dining")),
            SlotValidation::Accepted(true)
        );
    }

    #[test]
    fn outdoor_seating_without_a_hint_is_rejected() {
        let validated = validate(Slot::OutdoorSeating, &json!("terrace")).expect("validator");

        assert_eq!(validated.value, Value::Null);
        assert_eq!(validated.rejection, Some(Rejection::WrongOutdoorSeating));
        assert_eq!(validated.rejection.map(Rejection::signal), Some("wrong_outdoor_seating"));
    }

    #[test]
    fn slots_without_validators_are_not_validated() {
        assert!(validate(Slot::Preferences, &json!("spicy")).is_none());
        assert!(validate(Slot::ContextLocation, &json!("bank")).is_none());
    }
}
