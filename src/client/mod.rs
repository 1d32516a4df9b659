//! Upstream Client Module
//!
//! Abstraction over the single outbound call made on a cache miss.

mod http;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::Result;

pub use self::http::HttpFetcher;

/// One outbound GET against the country directory.
///
/// Implementations issue exactly one call per invocation and never retry.
/// Failures are classified as [`LookupError`](crate::error::LookupError)
/// kinds; a deadline that passes mid-call yields `Timeout`, never `Upstream`.
/// Dropping the returned future cancels the in-flight call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the raw payload at `target`, giving up at `deadline`.
    async fn fetch(&self, target: &str, deadline: Instant) -> Result<Vec<u8>>;
}
