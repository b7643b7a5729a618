//! Data types for the Discovery link exporter
//!
//! Wire types mirror the JSON returned by the Discovery search API.
//! Only the record `id` is interpreted; every other record field is kept
//! as an opaque JSON map.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Batch mark that asks the search API for the start of the result set
pub const START_BATCH_MARK: &str = "*";

/// Reference of an archival series, e.g. `PREM 8`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesRef(String);

impl SeriesRef {
    /// Create a series reference.
    ///
    /// The text is kept verbatim; it is only rejected when it is empty or
    /// whitespace-only.
    ///
    /// # Example
    /// ```
    /// use discovery_core::SeriesRef;
    ///
    /// let series = SeriesRef::new("War Office").unwrap();
    /// assert_eq!(series.file_stem(), "War_Office");
    /// assert!(SeriesRef::new("   ").is_err());
    /// ```
    pub fn new(reference: &str) -> Result<Self> {
        if reference.trim().is_empty() {
            return Err(DiscoveryError::InvalidSeries(reference.to_string()));
        }
        Ok(Self(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Output filename stem: every space replaced by an underscore.
    pub fn file_stem(&self) -> String {
        self.0.replace(' ', "_")
    }
}

impl fmt::Display for SeriesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog record returned by the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique Discovery identifier, e.g. `C12345`
    pub id: String,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Record carrying nothing but an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: serde_json::Map::new(),
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Records on this page, in reference order
    pub records: Vec<Record>,
    /// Total number of matching records (informational)
    pub count: u64,
    /// Continuation marker for the next page; absent, null or empty when exhausted
    #[serde(default)]
    pub next_batch_mark: Option<String>,
}

impl SearchPage {
    /// Continuation marker, if there is another page to request.
    pub fn next_mark(&self) -> Option<&str> {
        self.next_batch_mark.as_deref().filter(|mark| !mark.is_empty())
    }
}

/// Result of exporting one series or downloading one record
#[derive(Debug)]
pub enum ExportOutcome {
    /// File written with this many records
    Exported { path: PathBuf, records: usize },
    /// Nothing written
    Failed(DiscoveryError),
}

/// Outcome for one named item of a run
#[derive(Debug)]
pub struct ExportReport {
    pub name: String,
    pub outcome: ExportOutcome,
}

/// Per-item outcomes of a whole run, in processing order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ExportReport>,
}

impl RunSummary {
    pub fn push(&mut self, name: impl Into<String>, outcome: ExportOutcome) {
        self.reports.push(ExportReport {
            name: name.into(),
            outcome,
        });
    }

    pub fn exported(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, ExportOutcome::Exported { .. }))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ExportReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, ExportOutcome::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}
