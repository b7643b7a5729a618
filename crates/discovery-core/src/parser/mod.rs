//! Parsers for Discovery responses and local input files
//!
//! - `search`: Parse a search API response page
//! - `references`: Parse series lists and record reference lists

pub mod references;
pub mod search;

// Re-export main parsing functions
pub use references::{parse_reference_line, parse_reference_list, parse_series_list};
pub use search::parse_search_page;
