//! Upstream payload parsing
//!
//! The directory answers with a JSON array of matches; only the first entry
//! is read.

use serde_json::Value;

use crate::error::{LookupError, Result};
use crate::models::Country;

/// Extracts a [`Country`] from a directory payload.
///
/// Missing fields come back empty (or zero population) so the caller can
/// validate the record as a whole. Only a payload that is not JSON at all
/// fails here.
pub fn parse_country(payload: &[u8]) -> Result<Country> {
    let value: Value = serde_json::from_slice(payload).map_err(|e| {
        LookupError::InvalidData(format!("upstream payload is not valid JSON: {e}"))
    })?;
    let entry = value.get(0).unwrap_or(&Value::Null);

    let name = entry
        .pointer("/name/common")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let capital = entry
        .pointer("/capital/0")
        .and_then(Value::as_str)
        .unwrap_or_default();
    // Several currencies may be listed; the first in document order wins.
    let currency = entry
        .get("currencies")
        .and_then(Value::as_object)
        .and_then(|currencies| {
            currencies
                .values()
                .find_map(|c| c.get("symbol").and_then(Value::as_str))
        })
        .unwrap_or_default();
    let population = entry
        .get("population")
        .and_then(|p| {
            p.as_u64()
                .or_else(|| p.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
        })
        .unwrap_or(0);

    Ok(Country::new(name, capital, currency, population))
}
