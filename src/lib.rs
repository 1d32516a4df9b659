//! Country Search - cache-aside country lookup service
//!
//! Answers capital, currency symbol and population for a country name,
//! serving repeat lookups from an in-memory store and going to the upstream
//! directory only on a miss.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use error::LookupError;
pub use service::CountryService;
