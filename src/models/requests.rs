//! Request DTOs for the country search API
//!
//! Defines the query parameters accepted by the search endpoint.

use serde::Deserialize;

/// Query string for `GET /api/countries/search`
///
/// # Fields
/// - `name`: Country to look up (server default if absent or blank)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Country name as supplied by the caller
    #[serde(default)]
    pub name: Option<String>,
}

impl SearchQuery {
    /// Returns the trimmed name, or `default` when none was supplied.
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
    }
}
