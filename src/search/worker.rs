//! Fetch Worker Thread
//!
//! Runs lookup requests in a background thread so the UI never blocks on the
//! network. Requests arrive over a channel, each one is spawned as its own task
//! on a single-threaded tokio runtime, and results are sent back to the UI
//! thread as they complete. Overlapping fetches therefore run concurrently and
//! may finish in any order; the controller sorts out which result to render.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::lookup::{LookupError, SuggestionSource};
use super::suggestion::Suggestion;

/// Request to resolve a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Raw query string as typed
    pub query: String,
    /// Unique ID for tracking this request in logs
    pub request_id: u64,
}

/// Outcome of a fetch, tagged with the query that produced it
#[derive(Debug)]
pub enum FetchResponse {
    Success {
        query: String,
        request_id: u64,
        suggestions: Vec<Suggestion>,
    },
    Failure {
        query: String,
        request_id: u64,
        error: LookupError,
    },
}

impl FetchResponse {
    pub fn query(&self) -> &str {
        match self {
            FetchResponse::Success { query, .. } | FetchResponse::Failure { query, .. } => query,
        }
    }

    pub fn request_id(&self) -> u64 {
        match self {
            FetchResponse::Success { request_id, .. }
            | FetchResponse::Failure { request_id, .. } => *request_id,
        }
    }
}

/// Spawn the fetch worker thread
///
/// The worker runs until the request channel closes or `shutdown` is
/// cancelled. Fetches still outstanding at that point are dropped.
pub fn spawn_worker<S: SuggestionSource>(
    source: S,
    request_rx: UnboundedReceiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        // Keep panics off stderr, which would corrupt the TUI
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create fetch worker runtime: {}", e);
                    return;
                }
            };
            rt.block_on(worker_loop(source, request_rx, response_tx, shutdown));
        }));

        if let Err(e) = result {
            let panic_msg = if let Some(s) = e.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = e.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            log::error!("Fetch worker thread panicked: {}", panic_msg);
        }
    })
}

/// Main async worker loop - dispatches requests until told to stop
async fn worker_loop<S: SuggestionSource>(
    source: S,
    mut request_rx: UnboundedReceiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
    shutdown: CancellationToken,
) {
    log::debug!("Fetch worker started");

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                log::debug!("Fetch worker cancelled");
                break;
            }

            request = request_rx.recv() => {
                let Some(request) = request else {
                    break;
                };
                log::debug!("Fetch {} dispatched: {:?}", request.request_id, request.query);

                let source = source.clone();
                let response_tx = response_tx.clone();
                tokio::spawn(async move {
                    let response = handle_request(&source, request).await;
                    // UI thread gone; nothing left to deliver to
                    let _ = response_tx.send(response);
                });
            }
        }
    }

    log::debug!("Fetch worker shutting down");
}

/// Run a single fetch and wrap its outcome
async fn handle_request<S: SuggestionSource>(source: &S, request: FetchRequest) -> FetchResponse {
    let FetchRequest { query, request_id } = request;
    match source.fetch(&query).await {
        Ok(suggestions) => {
            log::debug!(
                "Fetch {} resolved with {} suggestions",
                request_id,
                suggestions.len()
            );
            FetchResponse::Success {
                query,
                request_id,
                suggestions,
            }
        }
        Err(error) => FetchResponse::Failure {
            query,
            request_id,
            error,
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
