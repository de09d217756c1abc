// 🌍 Country entity
//
// Countries are pre-seeded by the bulk loader; the directory never creates
// them on its own.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, two uppercase letters
    pub iso2: String,
    /// Display name, compared exactly on bank registration
    pub name: String,
    pub time_zone: String,
}

impl Country {
    pub fn new(
        iso2: impl Into<String>,
        name: impl Into<String>,
        time_zone: impl Into<String>,
    ) -> Self {
        Country {
            iso2: iso2.into(),
            name: name.into(),
            time_zone: time_zone.into(),
        }
    }
}
