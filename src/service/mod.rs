//! Lookup Service Module
//!
//! Cache-aside orchestration: serve from the store when possible, otherwise
//! fetch, validate and populate.

mod country;
mod parse;

pub use country::{target_url, CountryService, SEARCH_FIELDS};
pub use parse::parse_country;
