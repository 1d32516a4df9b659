//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// Base URL of the public country directory.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Country looked up when the caller does not name one.
pub const DEFAULT_COUNTRY: &str = "India";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream country directory
    pub upstream_base_url: Url,
    /// Client-level timeout in seconds for a single upstream call
    pub upstream_timeout: u64,
    /// Per-request deadline in seconds, applied by the HTTP boundary
    pub request_timeout: u64,
    /// Country name used when a search omits `name`
    pub default_country: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `UPSTREAM_BASE_URL` - Country directory base URL (default: restcountries v3.1)
    /// - `UPSTREAM_TIMEOUT` - Upstream client timeout in seconds (default: 7)
    /// - `REQUEST_TIMEOUT` - Per-request deadline in seconds (default: 5)
    /// - `DEFAULT_COUNTRY` - Country searched when none is given (default: India)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: parse_base_url("UPSTREAM_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: parse_timeout("UPSTREAM_TIMEOUT")
                .unwrap_or(defaults.upstream_timeout),
            request_timeout: parse_timeout("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            default_country: env::var("DEFAULT_COUNTRY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.default_country),
        }
    }

    /// Upstream client timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    /// Per-request deadline budget as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Reads a timeout in whole seconds; zero would expire every request at once.
fn parse_timeout(name: &str) -> Option<u64> {
    match parse_var::<u64>(name)? {
        0 => {
            warn!("{} must be greater than zero, using default", name);
            None
        }
        secs => Some(secs),
    }
}

/// Reads a base URL that path segments can be appended to.
fn parse_base_url(name: &str) -> Option<Url> {
    let raw = env::var(name).ok()?;
    let url = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(e) => {
            warn!("{} is not a valid URL ({}), using default", name, e);
            return None;
        }
    };
    if url.cannot_be_a_base() {
        warn!("{} cannot be used as a base URL, using default", name);
        return None;
    }
    Some(url)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            upstream_base_url: Url::parse(DEFAULT_UPSTREAM_BASE_URL)
                .expect("Default upstream URL is valid"),
            upstream_timeout: 7,
            request_timeout: 5,
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}
