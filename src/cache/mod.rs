//! Cache Module
//!
//! Process-lifetime, in-memory store of resolved countries. Entries are never
//! evicted or expired.

mod stats;
mod store;


// Re-export public types
pub use stats::CacheStats;
pub use store::CacheStore;
