//! Search response parser
//!
//! Decodes the JSON body of a `/API/search/records` response.

use crate::error::{DiscoveryError, Result};
use crate::types::SearchPage;

/// Parse one page of search results.
///
/// `records` and `count` are required and every record needs a string
/// `id`; `nextBatchMark` may be missing, `null` or empty on the last page.
///
/// # Errors
/// `DiscoveryError::MalformedResponse` if the body is not JSON of that shape.
///
/// # Examples
/// ```
/// use discovery_core::parser::parse_search_page;
///
/// let page = parse_search_page(r#"{"records":[{"id":"C1"}],"count":1,"nextBatchMark":""}"#).unwrap();
/// assert_eq!(page.records[0].id, "C1");
/// assert_eq!(page.next_mark(), None);
/// ```
pub fn parse_search_page(body: &str) -> Result<SearchPage> {
    serde_json::from_str(body).map_err(|e| DiscoveryError::MalformedResponse(e.to_string()))
}
