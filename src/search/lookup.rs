//! Lookup service client
//!
//! Defines the SuggestionSource seam, LookupError types, and the reqwest-backed
//! client for `GET /autocomplete?query=...`.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;

use super::suggestion::{Suggestion, parse_suggestions};

/// Path of the autocomplete endpoint, relative to the service base URL
const AUTOCOMPLETE_PATH: &str = "autocomplete";

/// Errors that can occur while fetching suggestions
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Service answered with a non-success status
    #[error("Lookup service returned HTTP {code}")]
    Status { code: u16 },

    /// Body was not a JSON array of suggestions
    #[error("Invalid response body: {message}")]
    Decode { message: String },

    /// No worker is available to run the fetch
    #[error("Lookup worker unavailable")]
    Unavailable,
}

/// Anything that can resolve a query into ranked suggestions.
///
/// Implemented by [`LookupClient`] for the real service; tests plug in fakes.
pub trait SuggestionSource: Clone + Send + Sync + 'static {
    fn fetch(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, LookupError>> + Send;
}

/// HTTP client for the lookup service
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: Client,
    endpoint: Url,
}

impl LookupClient {
    /// Create a client for the service rooted at `base_url`
    ///
    /// `timeout` bounds each request; `None` leaves it to the transport.
    pub fn new(base_url: &Url, timeout: Option<Duration>) -> Result<Self, LookupError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| LookupError::Network {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            endpoint: service_url(base_url, AUTOCOMPLETE_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `query`, with the query string URL-encoded
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("query", query);
        url
    }
}

impl SuggestionSource for LookupClient {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, LookupError> {
        let response = self
            .client
            .get(self.request_url(query))
            .send()
            .await
            .map_err(|e| LookupError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| LookupError::Network {
            message: e.to_string(),
        })?;

        parse_suggestions(&body).map_err(|e| LookupError::Decode {
            message: e.to_string(),
        })
    }
}

/// Resolve `path` against the service base URL
///
/// The base is treated as a directory, so `http://host/app` and
/// `http://host/app/` both resolve `autocomplete` to `http://host/app/autocomplete`.
pub fn service_url(base_url: &Url, path: &str) -> Result<Url, LookupError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| LookupError::Network {
            message: format!("Invalid service URL for {:?}: {}", path, e),
        })
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod lookup_tests;
