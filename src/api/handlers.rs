//! API Handlers
//!
//! HTTP request handlers for each endpoint. Handlers only translate between
//! HTTP and the lookup service; error kinds become status codes through
//! [`LookupError`](crate::error::LookupError)'s `IntoResponse`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use tokio::time::Instant;

use crate::cache::CacheStore;
use crate::client::HttpFetcher;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Country, HealthResponse, SearchQuery, StatsResponse};
use crate::service::CountryService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside lookup service
    pub service: Arc<CountryService>,
    /// Budget each search gets before its upstream call is abandoned
    pub request_timeout: Duration,
    /// Country searched when the caller names none
    pub default_country: Arc<str>,
}

impl AppState {
    /// Creates a new AppState around an assembled service.
    pub fn new(
        service: CountryService,
        request_timeout: Duration,
        default_country: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            request_timeout,
            default_country: default_country.into(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP fetcher and an empty cache store.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        let fetcher = HttpFetcher::new(config.upstream_timeout())?;
        let service = CountryService::new(
            Arc::new(fetcher),
            Arc::new(CacheStore::new()),
            config.upstream_base_url.clone(),
        );
        Ok(Self::new(
            service,
            config.request_timeout(),
            config.default_country.as_str(),
        ))
    }
}

/// Handler for GET /api/countries/search
///
/// Resolves `name` (or the default country) within the request deadline.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Country>> {
    let name = query.name_or(&state.default_country);
    let deadline = Instant::now() + state.request_timeout;

    let country = state.service.resolve(name, deadline).await?;

    Ok(Json(country))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache().stats().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
