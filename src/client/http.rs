//! Reqwest-backed fetcher
//!
//! Owns transport details only: connection pooling, deadline enforcement and
//! mapping HTTP outcomes onto lookup error kinds.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use super::Fetcher;
use crate::error::{LookupError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const POOL_MAX_IDLE_PER_HOST: usize = 20;
const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

// == Http Fetcher ==
/// Fetcher that performs pooled HTTP GET requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose client aborts any single call after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .tcp_keepalive(TCP_KEEPALIVE)
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, target: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if let Some(error) = map_status(status, target) {
            return Err(error);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!("Upstream returned {} bytes from {}", body.len(), target);
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, target: &str, deadline: Instant) -> Result<Vec<u8>> {
        if target.is_empty() {
            return Err(LookupError::InvalidData(
                "upstream target must not be empty".to_string(),
            ));
        }

        match timeout_at(deadline, self.send(target)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Deadline exceeded while calling {}", target);
                Err(LookupError::Timeout(format!(
                    "deadline exceeded calling {target}"
                )))
            }
        }
    }
}

/// Returns the error for a non-success status, None for 2xx.
fn map_status(status: StatusCode, target: &str) -> Option<LookupError> {
    if status.is_success() {
        return None;
    }
    match status {
        StatusCode::NOT_FOUND => Some(LookupError::NotFound(target.to_string())),
        _ => Some(LookupError::Upstream(format!(
            "status {} from {}",
            status.as_u16(),
            target
        ))),
    }
}

fn map_transport_error(error: reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout(error.to_string())
    } else if error.is_builder() {
        LookupError::Internal(error.to_string())
    } else {
        LookupError::Upstream(error.to_string())
    }
}
