// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use crate::search::{
    DEFAULT_CACHE_TTL_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_QUERY_LENGTH, SearchSettings,
};

/// Flask development server default
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_cache_ttl_ms() -> u64 {
    DEFAULT_CACHE_TTL_MS
}

fn default_min_query_length() -> usize {
    DEFAULT_MIN_QUERY_LENGTH
}

/// Lookup service configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupConfig {
    /// Root URL of the service hosting /autocomplete and /substance/<slug>
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset leaves it to the transport
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            base_url: default_base_url(),
            timeout_ms: None,
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Search behavior configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: default_debounce_ms(),
            cache_ttl_ms: default_cache_ttl_ms(),
            min_query_length: default_min_query_length(),
        }
    }
}

impl SearchConfig {
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            cache_ttl: Duration::from_millis(self.cache_ttl_ms),
            min_query_length: self.min_query_length,
            ..SearchSettings::default()
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub search: SearchConfig,
}
