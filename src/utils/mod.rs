//! Utility modules shared by the sources and the binary.
//!
//! - [`HttpClient`]: reqwest client with the per-request timeout applied

mod http;

pub use http::{HttpClient, DEFAULT_TIMEOUT};
