//! Paged fetch-and-filter loop.
//!
//! Pages are requested one after another starting at page 1. Each hit is kept
//! only if its first publication year is after [`THRESHOLD_YEAR`]. The loop
//! ends when the target count is reached, when the source returns an empty
//! page, or when a page request fails. A failure is never surfaced as an
//! error: whatever was collected so far is returned with
//! [`StopReason::Failed`].

use std::sync::Arc;

use crate::models::{PageRequest, ResultSet, StopReason};
use crate::sources::Source;

/// Only books first published strictly after this year are kept
pub const THRESHOLD_YEAR: i32 = 2000;

/// Hits requested per page
pub const PAGE_SIZE: usize = 100;

/// Collects filtered book records from a [`Source`]
#[derive(Debug, Clone)]
pub struct Fetcher {
    source: Arc<dyn Source>,
    fields: Option<String>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self {
            source,
            fields: None,
        }
    }

    /// Set the field hint sent with every page request
    pub fn fields(mut self, fields: Option<impl Into<String>>) -> Self {
        self.fields = fields.map(Into::into);
        self
    }

    /// Fetch up to `target_count` books for `query`.
    pub async fn fetch_books(&self, query: &str, target_count: usize) -> ResultSet {
        let mut books = Vec::with_capacity(target_count.min(PAGE_SIZE));
        let mut pages_requested = 0;
        let mut total_available = None;

        if target_count == 0 {
            return ResultSet {
                books,
                stop_reason: StopReason::TargetReached,
                pages_requested,
                total_available,
            };
        }

        tracing::info!(
            source = self.source.id(),
            query,
            target_count,
            "Starting fetch"
        );

        let mut page = 1;
        let stop_reason = loop {
            let request = PageRequest::new(query, PAGE_SIZE)
                .page(page)
                .fields(self.fields.as_deref());

            pages_requested += 1;
            let hits = match self.source.fetch_page(&request).await {
                Ok(hits) => hits,
                Err(e) => {
                    tracing::warn!(page, error = %e, "Fetch stopped early");
                    break StopReason::Failed(e.to_string());
                }
            };

            if total_available.is_none() {
                total_available = hits.num_found;
            }

            if hits.is_empty() {
                tracing::debug!(page, "Empty page, no more results");
                break StopReason::Exhausted;
            }

            let received = hits.books.len();
            let before = books.len();
            for book in hits.books {
                if !book.published_after(THRESHOLD_YEAR) {
                    continue;
                }
                books.push(book);
                if books.len() >= target_count {
                    break;
                }
            }

            tracing::debug!(
                page,
                received,
                kept = books.len() - before,
                total = books.len(),
                "Page processed"
            );

            if books.len() >= target_count {
                break StopReason::TargetReached;
            }
            page += 1;
        };

        tracing::info!(
            collected = books.len(),
            pages_requested,
            ?stop_reason,
            "Fetch finished"
        );

        ResultSet {
            books,
            stop_reason,
            pages_requested,
            total_available,
        }
    }
}
