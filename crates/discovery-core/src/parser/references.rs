//! Input list parsers
//!
//! Series lists hold one series reference per line. Reference lists hold
//! one record reference per line, optionally behind a label such as
//! `Reference: C4567`.

use crate::error::Result;
use crate::types::SeriesRef;

/// Parse a newline-delimited series list.
///
/// Lines are trimmed and blank lines skipped; order is preserved.
///
/// # Examples
/// ```
/// use discovery_core::parser::parse_series_list;
///
/// let series = parse_series_list("PREM 8\n\nWar Office\n").unwrap();
/// assert_eq!(series.len(), 2);
/// assert_eq!(series[1].as_str(), "War Office");
/// ```
pub fn parse_series_list(text: &str) -> Result<Vec<SeriesRef>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(SeriesRef::new)
        .collect()
}

/// Extract the record reference from one line of a reference list.
///
/// With a `label:` prefix the reference is the segment after the first
/// colon, up to any second colon. Returns `None` for blank lines.
///
/// # Examples
/// ```
/// use discovery_core::parser::parse_reference_line;
///
/// assert_eq!(parse_reference_line("C4567"), Some("C4567".to_string()));
/// assert_eq!(parse_reference_line("Reference: C4567 "), Some("C4567".to_string()));
/// assert_eq!(parse_reference_line("   "), None);
/// ```
pub fn parse_reference_line(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }

    let re_labelled = regex_lite::Regex::new(r"^[^:]*:([^:]*)").ok()?;
    let reference = match re_labelled.captures(line) {
        Some(caps) => caps.get(1)?.as_str(),
        None => line,
    };

    let reference = reference.trim();
    if reference.is_empty() {
        None
    } else {
        Some(reference.to_string())
    }
}

/// Parse every line of a reference list, skipping blanks.
pub fn parse_reference_list(text: &str) -> Vec<String> {
    text.lines().filter_map(parse_reference_line).collect()
}
