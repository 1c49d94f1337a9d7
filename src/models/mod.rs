//! Core data models for book records and paged searches.

mod book;
mod search;

pub use book::{BookRecord, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use search::{PageRequest, ResultSet, SearchPage, StopReason};
