use serde::{Deserialize, Serialize};

/// Cuisines the restaurant form accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    #[serde(rename = "south indian")]
    SouthIndian,
    #[serde(rename = "north indian")]
    NorthIndian,
    #[serde(rename = "continental")]
    Continental,
    #[serde(rename = "italian")]
    Italian,
    #[serde(rename = "punjabi")]
    Punjabi,
    #[serde(rename = "mexican")]
    Mexican,
    #[serde(rename = "assamese")]
    Assamese,
}

impl Cuisine {
    pub const ALL: [Cuisine; 7] = [
        Cuisine::SouthIndian,
        Cuisine::NorthIndian,
        Cuisine::Continental,
        Cuisine::Italian,
        Cuisine::Punjabi,
        Cuisine::Mexican,
        Cuisine::Assamese,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SouthIndian => "south indian",
            Self::NorthIndian => "north indian",
            Self::Continental => "continental",
            Self::Italian => "italian",
            Self::Punjabi => "punjabi",
            Self::Mexican => "mexican",
            Self::Assamese => "assamese",
        }
    }

    /// Matches an already normalized (lower-case) name exactly.
    pub fn from_normalized(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cuisine| cuisine.as_str() == value)
    }

    /// Human-readable list, e.g. "south indian, ..., mexican and assamese".
    pub fn supported_list() -> String {
        let names = Self::ALL.map(Cuisine::as_str);
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
            Some((last, _)) => (*last).to_string(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
