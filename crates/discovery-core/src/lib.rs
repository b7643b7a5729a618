//! Discovery Links Core Library
//!
//! Retrieves catalog record identifiers from The National Archives'
//! Discovery API and writes them as two-column TSV files for bulk import
//! into the EHRI portal.
//!
//! # Features
//! - Fetch every record of a series, following search batch marks
//! - Write `<details url>\t<id>` lines per series
//! - Convert plain reference lists without querying the API
//! - Download the XML details document of individual records

pub mod catalog;
pub mod client;
pub mod error;
pub mod links;
pub mod parser;
pub mod persist;
pub mod pipeline;
pub mod types;

// Re-export main types for convenience
pub use catalog::DiscoveryCatalog;
pub use client::{ClientConfig, DiscoveryClient};
pub use error::{DiscoveryError, Result};
pub use links::LinkWriter;
pub use types::{ExportOutcome, ExportReport, Record, RunSummary, SearchPage, SeriesRef};
