//! Page request and result set models.

use serde::{Deserialize, Serialize};

use super::BookRecord;

/// Parameters for a single page request against a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Search text
    pub query: String,

    /// 1-based page index
    pub page: usize,

    /// Number of hits per page
    pub limit: usize,

    /// Comma-separated field hint to trim the response payload
    pub fields: Option<String>,
}

impl PageRequest {
    /// Create a request for the first page
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            page: 1,
            limit,
            fields: None,
        }
    }

    /// Set the page index
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the field hint; blank hints are dropped
    pub fn fields(mut self, fields: Option<impl Into<String>>) -> Self {
        self.fields = fields.map(Into::into).filter(|f: &String| !f.trim().is_empty());
        self
    }
}

/// One page of normalized hits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    /// Hits in the order the source returned them
    pub books: Vec<BookRecord>,

    /// Total hits reported by the source, if any
    pub num_found: Option<u64>,
}

impl SearchPage {
    pub fn new(books: Vec<BookRecord>) -> Self {
        Self {
            books,
            num_found: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Why a fetch loop stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The requested number of records was collected
    TargetReached,

    /// The source returned an empty page
    Exhausted,

    /// A page request failed; holds the error message
    Failed(String),
}

/// Records collected by one fetch run, bounded by the target count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    /// Kept records in page order, then in-page order
    pub books: Vec<BookRecord>,

    /// Why fetching stopped
    pub stop_reason: StopReason,

    /// Number of page requests issued
    pub pages_requested: usize,

    /// Total hits for the query as reported by the source, if any
    pub total_available: Option<u64>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Whether the run ended on an error with partial results
    pub fn is_partial(&self) -> bool {
        matches!(self.stop_reason, StopReason::Failed(_))
    }
}
