use serde::Serialize;

/// A restaurant near campus. Records are compiled in and never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RestaurantRecord {
    pub name: &'static str,
    pub cuisines: &'static [&'static str],
    pub outdoor_seating: bool,
    pub non_veg: bool,
}

impl RestaurantRecord {
    /// Exact, case-sensitive membership in the record's cuisine list.
    pub fn serves(&self, cuisine: &str) -> bool {
        self.cuisines.iter().any(|served| *served == cuisine)
    }
}

// Cuisine strings are kept exactly as catalogued: "Punjabi" and "north indain"
// do not match the validator's lower-case spelling.
pub static CATALOG: [RestaurantRecord; 8] = [
    RestaurantRecord {
        name: "7th Block Night Canteen",
        cuisines: &["north indian"],
        outdoor_seating: true,
        non_veg: true,
    },
    RestaurantRecord {
        name: "NITK Block 3 Night Canteen",
        cuisines: &["continental", "south indian"],
        outdoor_seating: false,
        non_veg: false,
    },
    RestaurantRecord {
        name: "NITK Food Court (OM Caterers)",
        cuisines: &["north indian", "south indian"],
        outdoor_seating: false,
        non_veg: false,
    },
    RestaurantRecord {
        name: "Samudra Darshan café NITK",
        cuisines: &["north indain", "south indian"],
        outdoor_seating: true,
        non_veg: false,
    },
    RestaurantRecord {
        name: "Red Rock Residency",
        cuisines: &["north indian"],
        outdoor_seating: true,
        non_veg: true,
    },
    RestaurantRecord {
        name: "Red Rock's Bourbon Bakery & Cafe",
        cuisines: &["north indian", "italian", "continental"],
        outdoor_seating: true,
        non_veg: true,
    },
    RestaurantRecord {
        name: "Jyothi Prakash, Punjabi Dhaba",
        cuisines: &["Punjabi", "north indian"],
        outdoor_seating: true,
        non_veg: true,
    },
    RestaurantRecord {
        name: "Kalash Veg Restaurant",
        cuisines: &["north indian"],
        outdoor_seating: true,
        non_veg: true,
    },
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestaurantQuery {
    pub cuisine: Option<String>,
    pub outdoor_seating: Option<bool>,
}

impl RestaurantQuery {
    /// Narrows `catalog` in order: cuisine first, then outdoor seating.
    ///
    /// `outdoor_seating == Some(false)` applies no filter; indoor diners are
    /// offered every record.
    pub fn filter<'a>(&self, catalog: &'a [RestaurantRecord]) -> Vec<&'a RestaurantRecord> {
        catalog
            .iter()
            .filter(|record| self.cuisine.as_deref().map_or(true, |cuisine| record.serves(cuisine)))
            .filter(|record| self.outdoor_seating != Some(true) || record.outdoor_seating)
            .collect()
    }
}
