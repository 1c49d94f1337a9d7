//! Book model representing one normalized search hit.

use serde::{Deserialize, Serialize};

/// Placeholder written when a hit carries no usable title
pub const UNKNOWN_TITLE: &str = "N/A";

/// Placeholder written when a hit carries no usable author names
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A book as it is kept in memory and written to CSV.
///
/// Field order matches the CSV header (`title,author,year`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title, never empty
    pub title: String,

    /// Author names joined with ", ", never empty
    pub author: String,

    /// First publication year, when the source reported one
    pub year: Option<i32>,
}

impl BookRecord {
    /// Create a record from already-normalized values
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Build a record from raw hit fields, substituting placeholders
    /// for a missing or blank title and an empty author list.
    pub fn from_parts<S: AsRef<str>>(title: Option<&str>, authors: &[S], year: Option<i32>) -> Self {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => UNKNOWN_TITLE.to_string(),
        };

        let author = authors
            .iter()
            .map(|a| a.as_ref().trim())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let author = if author.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            author
        };

        Self { title, author, year }
    }

    /// Whether the record has a year strictly after `threshold`
    pub fn published_after(&self, threshold: i32) -> bool {
        self.year.is_some_and(|y| y > threshold)
    }
}
