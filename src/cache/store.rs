//! Cache Store Module
//!
//! Concurrency-safe map from lookup key to resolved [`Country`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::cache::CacheStats;
use crate::models::Country;

// == Cache Store ==
/// In-memory country cache shared by all lookups.
///
/// The lock guards a single map operation and is never held across an
/// `.await`. Empty keys never enter the map.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, Country>>,
    /// Successful reads
    hits: AtomicU64,
    /// Reads that found nothing
    misses: AtomicU64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns a copy of the country stored under `key`.
    ///
    /// An empty key is never found.
    pub fn get(&self, key: &str) -> Option<Country> {
        if key.is_empty() {
            return None;
        }

        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    // == Set ==
    /// Stores `country` under `key`, replacing any previous entry.
    ///
    /// An empty key is silently dropped.
    pub fn set(&self, key: impl Into<String>, country: Country) {
        let key = key.into();
        if key.is_empty() {
            return;
        }

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, country);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            total_entries: self.len(),
        }
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
