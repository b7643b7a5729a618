//! TSV link formatting
//!
//! Each exported line is `<details url><id>\t<id>`: the record's details
//! URL, a tab, then the id again. Lines are joined with `\n` and there is
//! no trailing newline, so an empty result set gives an empty file.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::persist::write_atomic;
use crate::types::{Record, SeriesRef};

/// Details URL of a record: the endpoint prefix followed by the id.
pub fn details_link(details_url: &str, id: &str) -> String {
    format!("{details_url}{id}")
}

/// One TSV line for a record id.
///
/// # Examples
/// ```
/// use discovery_core::links::format_link_line;
///
/// assert_eq!(
///     format_link_line("https://example.org/details/", "C1"),
///     "https://example.org/details/C1\tC1"
/// );
/// ```
pub fn format_link_line(details_url: &str, id: &str) -> String {
    format!("{}\t{}", details_link(details_url, id), id)
}

/// Format ids as TSV content, one line each, in input order.
pub fn format_links<'a, I>(details_url: &str, ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter()
        .map(|id| format_link_line(details_url, id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a series' records as TSV content.
pub fn format_records(details_url: &str, records: &[Record]) -> String {
    format_links(details_url, records.iter().map(|r| r.id.as_str()))
}

/// Output file name for a series, e.g. `PREM 8` -> `PREM_8.tsv`.
pub fn series_file_name(series: &SeriesRef) -> String {
    format!("{}.tsv", series.file_stem())
}

/// Writes link files into one output directory
#[derive(Debug, Clone)]
pub struct LinkWriter {
    output_dir: PathBuf,
    details_url: String,
}

impl LinkWriter {
    /// # Arguments
    /// * `output_dir` - Directory receiving the files, created on first write
    /// * `details_url` - Prefix of the details links written in the first column
    pub fn new(output_dir: impl Into<PathBuf>, details_url: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            details_url: details_url.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<series with underscores>.tsv`, replacing any existing file.
    ///
    /// An empty record slice still produces an (empty) file.
    pub fn write_series(&self, series: &SeriesRef, records: &[Record]) -> Result<PathBuf> {
        let content = format_records(&self.details_url, records);
        write_atomic(&self.output_dir, &series_file_name(series), &content)
    }

    /// Write `<stem>.tsv` for a plain list of record references.
    pub fn write_references(&self, stem: &str, references: &[String]) -> Result<PathBuf> {
        let content = format_links(&self.details_url, references.iter().map(String::as_str));
        write_atomic(&self.output_dir, &format!("{stem}.tsv"), &content)
    }

    /// Write a record's details document as `<id>.xml`.
    pub fn write_details_xml(&self, record_id: &str, xml: &str) -> Result<PathBuf> {
        write_atomic(&self.output_dir, &format!("{record_id}.xml"), xml)
    }
}
