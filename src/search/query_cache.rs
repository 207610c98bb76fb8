//! Time-bounded cache of lookup results keyed by the raw query string
//!
//! Entries expire lazily: a stale entry stays in the map but reads treat it as
//! absent. Nothing is ever evicted, so the cache grows for the lifetime of the
//! session.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::suggestion::Suggestion;

/// A fetched result set and when it was fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub result: Vec<Suggestion>,
    pub fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

#[derive(Debug)]
pub struct QueryCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, query: &str) -> Option<&CacheEntry> {
        self.get_at(query, Instant::now())
    }

    /// Look up `query`, returning the entry only while it is younger than the TTL.
    ///
    /// Keys are matched exactly: no trimming or case folding.
    pub fn get_at(&self, query: &str, now: Instant) -> Option<&CacheEntry> {
        self.entries
            .get(query)
            .filter(|entry| entry.is_fresh(self.ttl, now))
    }

    pub fn put(&mut self, query: &str, result: Vec<Suggestion>) {
        self.put_at(query, result, Instant::now());
    }

    /// Insert or overwrite the entry for `query`, stamped with `now`
    pub fn put_at(&mut self, query: &str, result: Vec<Suggestion>, now: Instant) {
        self.entries.insert(
            query.to_string(),
            CacheEntry {
                result,
                fetched_at: now,
            },
        );
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "query_cache_tests.rs"]
mod query_cache_tests;
