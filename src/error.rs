use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubsearchError {
    #[error("Invalid lookup service URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error(transparent)]
    Lookup(#[from] crate::search::LookupError),
}
