//! # Book Harvest
//!
//! Query the Open Library search API for a topic, keep books first published
//! after 2000, and save them to a CSV file.
//!
//! ## Architecture
//!
//! Data flows one way through the modules:
//!
//! - [`topics`]: Topic store backed by a side file
//! - [`selector`]: Turns one line of user input into a query
//! - [`fetcher`]: Paged fetch-and-filter loop over a [`Source`]
//! - [`sources`]: The [`Source`] trait, Open Library and a mock source
//! - [`writer`]: CSV output
//! - [`models`]: Book records and paging types
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal output
//! - [`utils`]: HTTP client

pub mod config;
pub mod fetcher;
pub mod models;
pub mod selector;
pub mod sources;
pub mod topics;
pub mod ui;
pub mod utils;
pub mod writer;

// Re-export commonly used types
pub use fetcher::{Fetcher, THRESHOLD_YEAR};
pub use models::{BookRecord, ResultSet, StopReason};
pub use sources::{Source, SourceError};
pub use topics::TopicStore;
pub use writer::write_csv;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
