//! Domain record and request/response models for the country search API
//!
//! `Country` is the validated lookup result; the remaining types are the
//! DTOs serialized on the HTTP boundary.

pub mod country;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use country::Country;
pub use requests::SearchQuery;
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
