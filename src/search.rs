//! Search module
//!
//! Query orchestration for incremental suggestions: a debouncer coalesces
//! keystrokes, a TTL cache answers repeat queries, and the controller drives
//! fetches on a background worker and decides what the suggestion panel shows.

mod controller;
mod debouncer;
pub mod lookup;
mod panel;
mod query_cache;
mod suggestion;
pub mod worker;

pub use controller::{
    DEFAULT_CACHE_TTL_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_IN_FLIGHT_TIMEOUT_MS,
    DEFAULT_MIN_QUERY_LENGTH, SearchController, SearchSettings,
};
pub use debouncer::Debouncer;
pub use lookup::{LookupClient, LookupError, SuggestionSource};
pub use panel::{
    ERROR_MESSAGE, HINT_MESSAGE, LOADING_MESSAGE, SearchPhase, SuggestionPanel, hint_message,
};
pub use query_cache::{CacheEntry, QueryCache};
pub use suggestion::{Suggestion, parse_suggestions};
pub use worker::{FetchRequest, FetchResponse};
