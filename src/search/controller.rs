//! Search controller
//!
//! Orchestrates one logical "current query" lifecycle: debounced input is
//! length-gated, served from the cache when fresh, and otherwise dispatched to
//! the fetch worker. Responses are drained cooperatively on the UI thread by
//! [`SearchController::poll_responses`], so all state here is single-owner.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use super::debouncer::Debouncer;
use super::lookup::LookupError;
use super::panel::{SearchPhase, SuggestionPanel};
use super::query_cache::QueryCache;
use super::suggestion::Suggestion;
use super::worker::{FetchRequest, FetchResponse};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;
pub const DEFAULT_IN_FLIGHT_TIMEOUT_MS: u64 = 10_000;

/// Timing and gating knobs for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub cache_ttl: Duration,
    /// Shortest query (in chars) that is looked up
    pub min_query_length: usize,
    /// How long an unanswered fetch blocks re-dispatching the same query
    pub in_flight_timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            in_flight_timeout: Duration::from_millis(DEFAULT_IN_FLIGHT_TIMEOUT_MS),
        }
    }
}

pub struct SearchController {
    min_query_length: usize,
    debouncer: Debouncer<String>,
    cache: QueryCache,
    /// Live text field value, updated on every keystroke before debouncing
    input_value: String,
    /// The query whose results the user currently expects to see.
    /// Responses for any other query are cached but not rendered.
    pending_query: Option<String>,
    /// Queries with an outstanding fetch, and when each was dispatched
    in_flight: HashMap<String, Instant>,
    in_flight_timeout: Duration,
    next_request_id: u64,
    phase: SearchPhase,
    panel: SuggestionPanel,
    request_tx: Option<UnboundedSender<FetchRequest>>,
    response_rx: Option<Receiver<FetchResponse>>,
}

impl SearchController {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            min_query_length: settings.min_query_length,
            debouncer: Debouncer::new(settings.debounce),
            cache: QueryCache::new(settings.cache_ttl),
            input_value: String::new(),
            pending_query: None,
            in_flight: HashMap::new(),
            in_flight_timeout: settings.in_flight_timeout,
            next_request_id: 0,
            phase: SearchPhase::Idle,
            panel: SuggestionPanel::Empty,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Set the channel handles for communication with the fetch worker
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<FetchRequest>,
        response_rx: Receiver<FetchResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn on_input(&mut self, value: &str) -> bool {
        self.on_input_at(value, Instant::now())
    }

    /// Record a text field change and (re)schedule the debounced search.
    ///
    /// Returns true if the panel changed, which only happens when a previous
    /// debounced query was overdue and had to run first.
    pub fn on_input_at(&mut self, value: &str, now: Instant) -> bool {
        self.input_value = value.to_string();
        match self.debouncer.call_at(value.to_string(), now) {
            Some(overdue) => {
                self.handle_query_at(&overdue, now);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Run the debounced search if it is due, then drain fetch responses.
    ///
    /// Returns true if anything visible changed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(query) = self.debouncer.poll_at(now) {
            self.handle_query_at(&query, now);
            changed = true;
        }
        self.poll_responses_at(now) || changed
    }

    pub fn handle_query(&mut self, query: &str) {
        self.handle_query_at(query, Instant::now());
    }

    /// The debounced target: gate on length, then cache, then fetch
    pub fn handle_query_at(&mut self, query: &str, now: Instant) {
        let length = query.chars().count();

        if length == 0 {
            self.pending_query = None;
            self.phase = SearchPhase::Idle;
            self.panel = SuggestionPanel::Empty;
            return;
        }

        if length < self.min_query_length {
            self.pending_query = None;
            self.phase = SearchPhase::TooShort;
            self.panel = SuggestionPanel::Hint {
                min_length: self.min_query_length,
            };
            return;
        }

        if let Some(entry) = self.cache.get_at(query, now) {
            log::debug!("Cache hit for {:?}", query);

            let result = entry.result.clone();
            self.pending_query = None;
            self.render_result(result);
            return;
        }

        self.pending_query = Some(query.to_string());
        self.phase = SearchPhase::Resolving;
        self.panel = SuggestionPanel::Loading;

        if let Some(dispatched_at) = self.in_flight.get(query) {
            if now.saturating_duration_since(*dispatched_at) < self.in_flight_timeout {
                log::debug!("Fetch for {:?} already in flight, waiting on it", query);
                return;
            }
            log::debug!("Fetch for {:?} never answered, dispatching again", query);
        }

        if let Err(error) = self.dispatch(query, now) {
            self.pending_query = None;
            self.show_failure(query, &error);
        }
    }

    /// Poll the response channel for completed fetches
    ///
    /// Uses try_recv() for non-blocking polling.
    /// Returns true if any state changed (responses received or disconnected).
    pub fn poll_responses(&mut self) -> bool {
        self.poll_responses_at(Instant::now())
    }

    pub fn poll_responses_at(&mut self, now: Instant) -> bool {
        let Some(ref rx) = self.response_rx else {
            return false;
        };

        let mut responses = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        let had_responses = !responses.is_empty();
        for response in responses {
            self.process_response(response, now);
        }

        if disconnected {
            self.request_tx = None;
            self.response_rx = None;
            self.in_flight.clear();
            if let Some(query) = self.pending_query.take() {
                self.show_failure(&query, &LookupError::Unavailable);
            }
        }

        had_responses || disconnected
    }

    /// Navigation target for the row at `index`, if one is showing
    pub fn activate(&self, index: usize) -> Option<String> {
        self.panel.rows().get(index).map(Suggestion::detail_path)
    }

    pub fn panel(&self) -> &SuggestionPanel {
        &self.panel
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn pending_query(&self) -> Option<&str> {
        self.pending_query.as_deref()
    }

    pub fn is_in_flight(&self, query: &str) -> bool {
        self.in_flight.contains_key(query)
    }

    /// When the debounced search next becomes due, for bounding event polling
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn dispatch(&mut self, query: &str, now: Instant) -> Result<(), LookupError> {
        let tx = self.request_tx.as_ref().ok_or(LookupError::Unavailable)?;

        self.next_request_id = self.next_request_id.wrapping_add(1);
        let request = FetchRequest {
            query: query.to_string(),
            request_id: self.next_request_id,
        };
        tx.send(request).map_err(|_| LookupError::Unavailable)?;

        log::debug!("Dispatched fetch {} for {:?}", self.next_request_id, query);
        self.in_flight.insert(query.to_string(), now);
        Ok(())
    }

    fn process_response(&mut self, response: FetchResponse, now: Instant) {
        self.in_flight.remove(response.query());
        let is_current = self.pending_query.as_deref() == Some(response.query());

        match response {
            FetchResponse::Success {
                query,
                request_id,
                suggestions,
            } => {
                self.cache.put_at(&query, suggestions.clone(), now);
                if is_current {
                    self.pending_query = None;
                    self.render_result(suggestions);
                } else {
                    log::debug!(
                        "Fetch {} for {:?} superseded; cached without rendering",
                        request_id,
                        query
                    );
                }
            }
            FetchResponse::Failure {
                query,
                request_id,
                error,
            } => {
                log::error!("Search error for {:?} (fetch {}): {}", query, request_id, error);
                if is_current {
                    self.pending_query = None;
                    self.phase = SearchPhase::Rendered;
                    self.panel = SuggestionPanel::Error;
                }
            }
        }
    }

    /// Replace the panel with a result set.
    ///
    /// The no-results message reads the live input value, not the query that
    /// produced the result, so it reflects whatever the field shows right now.
    fn render_result(&mut self, result: Vec<Suggestion>) {
        self.phase = SearchPhase::Rendered;
        self.panel = if result.is_empty() {
            SuggestionPanel::NoResults {
                input: self.input_value.clone(),
            }
        } else {
            SuggestionPanel::Rows(result)
        };
    }

    fn show_failure(&mut self, query: &str, error: &LookupError) {
        log::error!("Search error for {:?}: {}", query, error);
        self.phase = SearchPhase::Rendered;
        self.panel = SuggestionPanel::Error;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
