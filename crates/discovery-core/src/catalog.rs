//! Discovery catalog API
//!
//! High-level operations on top of [`DiscoveryClient`]: fetching every
//! record of a series across search pages, and retrieving the XML details
//! of a single record.

use tokio::time::sleep;
use tracing::debug;

use crate::client::{DiscoveryClient, ACCEPT_JSON, ACCEPT_XML};
use crate::error::{DiscoveryError, Result};
use crate::parser::parse_search_page;
use crate::types::{Record, SearchPage, SeriesRef, START_BATCH_MARK};

/// Sort order requested from the search API; results come back by ascending reference
const SORT_BY_REFERENCE: &str = "REFERENCE_ASCENDING";

/// Main API for the Discovery catalog
///
/// # Example
/// ```no_run
/// use discovery_core::{DiscoveryCatalog, SeriesRef};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let catalog = DiscoveryCatalog::new()?;
///     let records = catalog.fetch_all(&SeriesRef::new("PREM 8")?).await?;
///     println!("Found {} records", records.len());
///     Ok(())
/// }
/// ```
pub struct DiscoveryCatalog {
    client: DiscoveryClient,
}

impl DiscoveryCatalog {
    /// Create a catalog with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = DiscoveryClient::new()?;
        Ok(Self { client })
    }

    /// Create a catalog over a pre-configured client.
    pub fn with_client(client: DiscoveryClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DiscoveryClient {
        &self.client
    }

    /// Request a single page of records for a series.
    ///
    /// # Arguments
    /// * `series` - Series to search in
    /// * `batch_mark` - `*` for the first page, otherwise the previous page's `nextBatchMark`
    pub async fn search_page(&self, series: &SeriesRef, batch_mark: &str) -> Result<SearchPage> {
        let config = self.client.config();
        let page_size = config.page_size.to_string();
        let query = [
            ("sps.recordSeries", series.as_str()),
            ("sps.searchQuery", "*"),
            ("sps.sortByOption", SORT_BY_REFERENCE),
            ("sps.resultsPageSize", page_size.as_str()),
            ("sps.batchStartMark", batch_mark),
        ];

        let body = self
            .client
            .get_text(&config.search_url, &query, ACCEPT_JSON)
            .await?;
        parse_search_page(&body)
    }

    /// Fetch every record of a series, in the order the API returns them.
    ///
    /// Pages are requested one after another, pausing for the configured
    /// page delay before each request but the first. The loop ends on a
    /// page with no records or without a continuation marker.
    ///
    /// # Errors
    /// Any failed page fails the whole series; no partial result is returned.
    /// - `DiscoveryError::HttpError` / `DiscoveryError::Status` - request failed
    /// - `DiscoveryError::MalformedResponse` - unexpected body, or the API
    ///   handed back the marker it was just queried with
    pub async fn fetch_all(&self, series: &SeriesRef) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut batch_mark = START_BATCH_MARK.to_string();
        let mut first_page = true;

        loop {
            if !first_page {
                self.pause().await;
            }

            let page = self.search_page(series, &batch_mark).await?;
            debug!(
                series = %series,
                batch_mark = %batch_mark,
                records = page.records.len(),
                "Results retrieved"
            );
            if first_page {
                debug!(series = %series, expected = page.count, "Series size reported");
            }
            first_page = false;

            if page.records.is_empty() {
                break;
            }

            let next_mark = page.next_mark().map(str::to_owned);
            records.extend(page.records);

            match next_mark {
                None => break,
                Some(mark) if mark == batch_mark => {
                    return Err(DiscoveryError::MalformedResponse(format!(
                        "batch mark {mark:?} did not advance"
                    )));
                }
                Some(mark) => batch_mark = mark,
            }
        }

        Ok(records)
    }

    /// Retrieve the XML details document of a record.
    ///
    /// # Errors
    /// - `DiscoveryError::MalformedResponse` if `record_id` is blank
    /// - `DiscoveryError::Status` if the record does not exist
    pub async fn record_details_xml(&self, record_id: &str) -> Result<String> {
        let record_id = record_id.trim();
        if record_id.is_empty() {
            return Err(DiscoveryError::MalformedResponse(
                "record id cannot be empty".to_string(),
            ));
        }

        let url = format!(
            "{}{}",
            self.client.config().details_url,
            urlencoding::encode(record_id)
        );
        self.client.get_text(&url, &[], ACCEPT_XML).await
    }

    /// Wait out the configured delay between consecutive requests.
    pub async fn pause(&self) {
        let delay = self.client.config().page_delay;
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
