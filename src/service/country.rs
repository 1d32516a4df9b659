//! Country Lookup Service
//!
//! Resolves a country name to a validated [`Country`], going upstream only on
//! a cache miss.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use super::parse::parse_country;
use crate::cache::CacheStore;
use crate::client::Fetcher;
use crate::error::{LookupError, Result};
use crate::models::Country;

/// Fields requested from the directory; exactly what a [`Country`] needs.
pub const SEARCH_FIELDS: &str = "name,capital,currencies,population";

// == Country Service ==
/// Cache-aside lookup over a [`Fetcher`] and a [`CacheStore`].
///
/// The store is owned by whoever builds the service, so several services
/// (or tests) can share or isolate it as needed.
#[derive(Clone)]
pub struct CountryService {
    fetcher: Arc<dyn Fetcher>,
    cache: Arc<CacheStore>,
    base_url: Url,
}

impl CountryService {
    // == Constructor ==
    /// Creates a service querying the directory rooted at `base_url`.
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: Arc<CacheStore>, base_url: Url) -> Self {
        Self {
            fetcher,
            cache,
            base_url,
        }
    }

    /// Returns the backing store.
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    // == Resolve ==
    /// Looks up `name`, calling upstream at most once and never past `deadline`.
    ///
    /// A cached record is returned as-is. Upstream errors are passed through
    /// unchanged and leave the store untouched, as does a record that fails
    /// validation. A successful fetch is written to the store in a detached
    /// task; the caller does not wait for it, so two concurrent misses on the
    /// same name both go upstream.
    pub async fn resolve(&self, name: &str, deadline: Instant) -> Result<Country> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::InvalidData(
                "country name must not be empty".to_string(),
            ));
        }

        debug!("Searching local cache for {}", name);
        if let Some(country) = self.cache.get(name) {
            info!("Cache hit for {}", name);
            return Ok(country);
        }

        info!("Cache miss for {}, querying upstream", name);
        let target = target_url(&self.base_url, name)?;

        let payload = match self.fetcher.fetch(target.as_str(), deadline).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Upstream lookup for {} failed: {}", name, e);
                return Err(e);
            }
        };

        let country = parse_country(&payload)?;
        if let Some(field) = country.missing_field() {
            warn!("Upstream record for {} is missing {}", name, field);
            return Err(LookupError::InvalidData(format!(
                "upstream record for {name} is missing {field}"
            )));
        }

        self.populate(name, country.clone());
        Ok(country)
    }

    /// Writes `country` to the store without waiting for the write.
    fn populate(&self, key: &str, country: Country) {
        let cache = Arc::clone(&self.cache);
        let key = key.to_string();
        tokio::spawn(async move {
            debug!("Storing {} in local cache", key);
            cache.set(key, country);
        });
    }
}

// == Target URL ==
/// Builds the exact-match directory query for `name`.
///
/// The name becomes one escaped path segment under `{base}/name/`.
pub fn target_url(base: &Url, name: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LookupError::Internal(format!("upstream base URL {base} cannot be a base")))?
        .pop_if_empty()
        .push("name")
        .push(name);
    url.set_query(Some(&format!("fields={SEARCH_FIELDS}&fullText=true")));
    Ok(url)
}
