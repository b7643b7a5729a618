//! HTTP client for the Discovery API
//!
//! Thin wrapper around `reqwest` that applies the configured timeout and
//! user agent and turns every non-success status into an error. There is
//! no retry logic: a failed request fails the whole operation.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};

use crate::error::{DiscoveryError, Result};

/// Search endpoint of the Discovery API
pub const DEFAULT_SEARCH_URL: &str = "https://discovery.nationalarchives.gov.uk/API/search/records";

/// Record details endpoint; a record id is appended to form its URL
pub const DEFAULT_DETAILS_URL: &str =
    "https://discovery.nationalarchives.gov.uk/API/records/v1/details/";

/// Number of records requested per search page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

const DEFAULT_USER_AGENT: &str = concat!("discovery-links/", env!("CARGO_PKG_VERSION"));

pub(crate) const ACCEPT_JSON: &str = "application/json";
pub(crate) const ACCEPT_XML: &str = "application/xml";

/// Configuration for the Discovery HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Search endpoint (default: public Discovery API)
    pub search_url: String,
    /// Details endpoint prefix, also used for the links written to TSV files
    pub details_url: String,
    /// Records per search page (default: 1000)
    pub page_size: u32,
    /// Pause before every request after the first of a sequence (default: 1s)
    pub page_delay: Duration,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            details_url: DEFAULT_DETAILS_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: Duration::from_secs(1),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the Discovery API
pub struct DiscoveryClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl DiscoveryClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `url` with the given query parameters and return the body.
    ///
    /// # Errors
    /// - `DiscoveryError::HttpError` - network failure or unreadable body
    /// - `DiscoveryError::Status` - any non-success status
    pub async fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        accept: &'static str,
    ) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, HeaderValue::from_static(accept))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
