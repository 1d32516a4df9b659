//! Country Record
//!
//! The validated result of a single lookup.

use serde::Serialize;

// == Country ==
/// Capital, currency symbol and population for one country.
///
/// A record is only usable when `name`, `capital` and `currency` are all
/// non-empty. A population of zero is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Common display name
    pub name: String,
    /// Primary capital city
    pub capital: String,
    /// One currency symbol
    pub currency: String,
    /// Population as reported upstream
    pub population: u64,
}

impl Country {
    /// Creates a new Country record.
    pub fn new(
        name: impl Into<String>,
        capital: impl Into<String>,
        currency: impl Into<String>,
        population: u64,
    ) -> Self {
        Self {
            name: name.into(),
            capital: capital.into(),
            currency: currency.into(),
            population,
        }
    }

    // == Validate ==
    /// Returns the name of the first missing required field, None if usable.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            return Some("name");
        }
        if self.capital.is_empty() {
            return Some("capital");
        }
        if self.currency.is_empty() {
            return Some("currency");
        }
        None
    }

    /// Returns true if every required field is present.
    pub fn is_valid(&self) -> bool {
        self.missing_field().is_none()
    }
}
