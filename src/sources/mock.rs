//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::models::{BookRecord, PageRequest, SearchPage};
use crate::sources::{Source, SourceError};

/// A mock source that replays scripted pages.
///
/// Page `n` (1-based) returns the `n`th scripted page; pages past the end
/// are empty. A failure can be injected for one page index.
#[derive(Debug, Default)]
pub struct MockSource {
    pages: Mutex<Vec<SearchPage>>,
    fail_on: Mutex<Option<(usize, String)>>,
    requests: Mutex<Vec<PageRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockSource {
    /// Create a new mock source with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source from a list of pages.
    pub fn with_pages(pages: Vec<Vec<BookRecord>>) -> Self {
        let source = Self::new();
        for page in pages {
            source.push_page(page);
        }
        source
    }

    /// Append a page to the script.
    pub fn push_page(&self, books: Vec<BookRecord>) {
        lock(&self.pages).push(SearchPage::new(books));
    }

    /// Set the total hit count reported with `page` (1-based).
    pub fn set_num_found(&self, page: usize, num_found: u64) {
        let mut pages = lock(&self.pages);
        if let Some(scripted) = page.checked_sub(1).and_then(|idx| pages.get_mut(idx)) {
            scripted.num_found = Some(num_found);
        }
    }

    /// Make the request for `page` fail with a network error.
    pub fn fail_on_page(&self, page: usize, message: impl Into<String>) {
        *lock(&self.fail_on) = Some((page, message.into()));
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<PageRequest> {
        lock(&self.requests).clone()
    }

    /// Number of page requests received so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, SourceError> {
        lock(&self.requests).push(request.clone());

        if let Some((page, message)) = &*lock(&self.fail_on) {
            if *page == request.page {
                return Err(SourceError::Network(message.clone()));
            }
        }

        let pages = lock(&self.pages);
        Ok(request
            .page
            .checked_sub(1)
            .and_then(|idx| pages.get(idx))
            .cloned()
            .unwrap_or_default())
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(title: &str, year: Option<i32>) -> BookRecord {
    BookRecord::new(title, "Test Author", year)
}

/// Helper function to create a page of `count` books sharing one year.
pub fn make_page(prefix: &str, count: usize, year: Option<i32>) -> Vec<BookRecord> {
    (1..=count)
        .map(|i| make_book(&format!("{} {}", prefix, i), year))
        .collect()
}
