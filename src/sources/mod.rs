//! Book search sources behind a small trait.
//!
//! The [`Source`] trait is the seam between the paging loop in
//! [`crate::fetcher`] and the remote API. [`OpenLibrarySource`] talks to the
//! Open Library search endpoint; [`MockSource`] replays scripted pages and is
//! used by the tests.
//!
//! A source only ever fetches one page. Paging, filtering and the stop rules
//! live in the fetcher.

mod openlibrary;

pub mod mock;

pub use mock::MockSource;
pub use openlibrary::{OpenLibrarySource, DEFAULT_FIELDS, OPENLIBRARY_SEARCH_URL};

use crate::models::{PageRequest, SearchPage};
use async_trait::async_trait;

/// The Source trait defines the interface for all book search backends.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "openlibrary")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch one page of hits, normalized into book records.
    ///
    /// Records are returned unfiltered; an empty page means the source has
    /// no more results for the query.
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, SourceError>;
}

/// Errors that can occur when fetching a page from a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status returned by the source
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
