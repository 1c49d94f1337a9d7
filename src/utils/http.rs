//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Per-request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            timeout,
        )
    }

    /// Create a client with a custom user agent
    pub fn with_user_agent(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
