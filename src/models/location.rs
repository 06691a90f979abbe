//! Location query normalization and geocoding results

use serde::{Deserialize, Serialize};

/// Country reported when geocoding gives none
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A user-submitted location name, normalized for upstream lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Trim the input, upper-case the first character and lower-case the rest.
    ///
    /// Empty input is kept as an empty query so the geocoder can report it
    /// as not found.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let mut chars = raw.trim().chars();
        let normalized = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };
        Self(normalized)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geocoding outcome for a query that resolved to at least one place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoResult {
    pub country: String,
}

impl GeoResult {
    #[must_use]
    pub fn new(country: Option<String>) -> Self {
        Self {
            country: country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        }
    }
}
