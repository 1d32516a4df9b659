//! API Module
//!
//! HTTP handlers and routing for the country search REST API.
//!
//! # Endpoints
//! - `GET /api/countries/search?name=<country>` - Look up a country
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
