//! Static response tables for campus location and department questions.
//!
//! Every table is an immutable list of `(normalized name, response key)` pairs.
//! A lookup succeeds only when exactly one candidate is supplied and its
//! normalized form is a key of the table; every other case resolves to
//! [`ResponseKey::DEFAULT`].

use crate::domain::response::ResponseKey;

#[derive(Clone, Copy, Debug)]
pub struct LookupTable {
    name: &'static str,
    entries: &'static [(&'static str, ResponseKey)],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupMiss {
    NoCandidate,
    Ambiguous { count: usize },
    Unrecognized { normalized: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched(ResponseKey),
    Missed(LookupMiss),
}

impl Resolution {
    /// The key to render; misses fall back to the default response.
    pub fn response_key(&self) -> ResponseKey {
        match self {
            Self::Matched(key) => *key,
            Self::Missed(_) => ResponseKey::DEFAULT,
        }
    }
}

/// Lower-cases and turns underscores into spaces, so `Central_Library` and
/// `central library` land on the same key.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase().replace('_', " ")
}

impl LookupTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, ResponseKey)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Exact match on an already normalized key.
    pub fn get(&self, normalized: &str) -> Option<ResponseKey> {
        self.entries.iter().find(|(key, _)| *key == normalized).map(|(_, response)| *response)
    }

    pub fn resolve(&self, raw: &str) -> Resolution {
        let normalized = normalize_name(raw);
        match self.get(&normalized) {
            Some(key) => Resolution::Matched(key),
            None => Resolution::Missed(LookupMiss::Unrecognized { normalized }),
        }
    }

    pub fn resolve_single(&self, candidates: &[&str]) -> Resolution {
        match candidates {
            [] => Resolution::Missed(LookupMiss::NoCandidate),
            [single] => self.resolve(single),
            many => Resolution::Missed(LookupMiss::Ambiguous { count: many.len() }),
        }
    }
}

/// Opening hours, keyed by the `Location` entity of a direct question.
pub const OPENING_HOURS: LookupTable = LookupTable::new(
    "opening_hours",
    &[
        ("amul", ResponseKey("utter_open_close_time_amul")),
        ("nescafe", ResponseKey("utter_open_close_time_nescafe")),
        ("nandini", ResponseKey("utter_open_close_time_nandini")),
        ("academic building", ResponseKey("utter_open_close_time_academic_building")),
        ("mudrika", ResponseKey("utter_open_close_time_printing")),
        ("electrical shop", ResponseKey("utter_open_close_time_delivery")),
        ("health care centre", ResponseKey("utter_open_close_time_health_care_centre")),
        ("sports complex", ResponseKey("utter_open_close_time_sports_complex")),
        ("bank", ResponseKey("utter_open_close_time_bank")),
        ("central computer centre", ResponseKey("utter_open_close_time_central_computer_centre")),
        ("central library", ResponseKey("utter_open_close_time_central_library")),
    ],
);

/// Opening hours, keyed by the intent stored as conversation context.
pub const CONTEXT_OPENING_HOURS: LookupTable = LookupTable::new(
    "context_opening_hours",
    &[
        ("snacks", ResponseKey("utter_open_close_time_snacks")),
        ("academic building", ResponseKey("utter_open_close_time_academic_building")),
        ("printing", ResponseKey("utter_open_close_time_printing")),
        ("delivery", ResponseKey("utter_open_close_time_delivery")),
        ("health care centre", ResponseKey("utter_open_close_time_health_care_centre")),
        ("sports complex", ResponseKey("utter_open_close_time_sports_complex")),
        ("bank", ResponseKey("utter_open_close_time_bank")),
        ("central computer centre", ResponseKey("utter_open_close_time_central_computer_centre")),
        ("central library", ResponseKey("utter_open_close_time_central_library")),
    ],
);

/// Directions, keyed by the `Location` entity of a direct question.
pub const WHEREABOUTS: LookupTable = LookupTable::new(
    "whereabouts",
    &[
        ("amul", ResponseKey("utter_location_amul")),
        ("nescafe", ResponseKey("utter_location_nescafe")),
        ("nandini", ResponseKey("utter_location_nandini")),
        ("academic building", ResponseKey("utter_location_academic_building")),
        ("mudrika", ResponseKey("utter_location_printing")),
        ("electrical shop", ResponseKey("utter_location_delivery")),
        ("health care centre", ResponseKey("utter_location_health_care_centre")),
        ("sports complex", ResponseKey("utter_location_sports_complex")),
        ("bank", ResponseKey("utter_location_bank")),
        ("central computer centre", ResponseKey("utter_location_central_computer_centre")),
        ("central library", ResponseKey("utter_location_central_library")),
    ],
);

/// Directions, keyed by the intent stored as conversation context.
pub const CONTEXT_WHEREABOUTS: LookupTable = LookupTable::new(
    "context_whereabouts",
    &[
        ("snacks", ResponseKey("utter_location_snacks")),
        ("academic building", ResponseKey("utter_location_academic_building")),
        ("printing", ResponseKey("utter_location_printing")),
        ("delivery", ResponseKey("utter_location_delivery")),
        ("health care centre", ResponseKey("utter_location_health_care_centre")),
        ("sports complex", ResponseKey("utter_location_sports_complex")),
        ("bank", ResponseKey("utter_location_bank")),
        ("central computer centre", ResponseKey("utter_location_central_computer_centre")),
        ("central library", ResponseKey("utter_location_central_library")),
    ],
);

/// Department offices, keyed by the `Department` entity.
pub const DEPARTMENTS: LookupTable = LookupTable::new(
    "departments",
    &[
        ("computer science and engineering", ResponseKey("utter_department_cse")),
        ("cse", ResponseKey("utter_department_cse")),
        ("information technology", ResponseKey("utter_department_it")),
        ("it", ResponseKey("utter_department_it")),
        ("electronics and communication", ResponseKey("utter_department_ece")),
        ("ece", ResponseKey("utter_department_ece")),
        ("electrical and electronics", ResponseKey("utter_department_eee")),
        ("eee", ResponseKey("utter_department_eee")),
        ("mechanical", ResponseKey("utter_department_mechanical")),
        ("civil", ResponseKey("utter_department_civil")),
        ("chemical", ResponseKey("utter_department_chemical")),
        ("metallurgical and materials", ResponseKey("utter_department_metallurgy")),
        ("mining", ResponseKey("utter_department_mining")),
        ("mathematical and computational sciences", ResponseKey("utter_department_mathematics")),
        ("physics", ResponseKey("utter_department_physics")),
        ("chemistry", ResponseKey("utter_department_chemistry")),
    ],
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        normalize_name, LookupMiss, LookupTable, Resolution, CONTEXT_OPENING_HOURS,
        CONTEXT_WHEREABOUTS, DEPARTMENTS, OPENING_HOURS, WHEREABOUTS,
    };
    use crate::domain::response::ResponseKey;

    #[test]
    fn single_recognized_location_resolves_to_its_key() {
        assert_eq!(
            OPENING_HOURS.resolve_single(&["amul"]).response_key(),
            ResponseKey("utter_open_close_time_amul")
        );
    }

    #[test]
    fn multiple_or_missing_locations_fall_back_to_default() {
        assert_eq!(
            OPENING_HOURS.resolve_single(&["amul", "bank"]),
            Resolution::Missed(LookupMiss::Ambiguous { count: 2 })
        );
        assert_eq!(OPENING_HOURS.resolve_single(&["amul", "bank"]).response_key(), ResponseKey::DEFAULT);
        assert_eq!(OPENING_HOURS.resolve_single(&[]).response_key(), ResponseKey::DEFAULT);
    }

    #[test]
    fn unrecognized_location_reports_normalized_name() {
        assert_eq!(
            OPENING_HOURS.resolve("Lecture_Hall_Complex"),
            Resolution::Missed(LookupMiss::Unrecognized {
                normalized: "lecture hall complex".to_string()
            })
        );
    }

    #[test]
    fn names_are_normalized_before_lookup() {
        assert_eq!(normalize_name("Central_Library"), "central library");
        assert_eq!(
            OPENING_HOURS.resolve("Central_Library").response_key(),
            ResponseKey("utter_open_close_time_central_library")
        );
        assert_eq!(
            CONTEXT_OPENING_HOURS.resolve("health_care_centre").response_key(),
            ResponseKey("utter_open_close_time_health_care_centre")
        );
    }

    #[test]
    fn tables_are_disjoint_in_what_they_recognize() {
        assert_eq!(OPENING_HOURS.resolve("snacks").response_key(), ResponseKey::DEFAULT);
        assert_eq!(CONTEXT_OPENING_HOURS.resolve("amul").response_key(), ResponseKey::DEFAULT);
        assert_eq!(DEPARTMENTS.resolve("bank").response_key(), ResponseKey::DEFAULT);
    }

    #[test]
    fn department_aliases_share_a_response() {
        assert_eq!(DEPARTMENTS.resolve("CSE"), DEPARTMENTS.resolve("Computer_Science_and_Engineering"));
    }

    #[test]
    fn table_keys_are_normalized_and_unique() {
        let tables: [LookupTable; 5] =
            [OPENING_HOURS, CONTEXT_OPENING_HOURS, WHEREABOUTS, CONTEXT_WHEREABOUTS, DEPARTMENTS];
        for table in tables {
            let mut seen = HashSet::new();
            for key in table.keys() {
                assert_eq!(normalize_name(key), key, "{} key `{key}` is not normalized", table.name());
                assert!(seen.insert(key), "{} repeats key `{key}`", table.name());
            }
            assert!(!table.is_empty());
            assert_eq!(seen.len(), table.len());
        }
    }
}
