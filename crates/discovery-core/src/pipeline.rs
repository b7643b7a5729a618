//! Export runs
//!
//! A run walks its inputs one at a time. A failing series or record is
//! logged and recorded in the [`RunSummary`], and the run carries on with
//! the next one.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::DiscoveryCatalog;
use crate::error::{DiscoveryError, Result};
use crate::links::LinkWriter;
use crate::parser::{parse_reference_list, parse_series_list};
use crate::persist::read_text;
use crate::types::{ExportOutcome, RunSummary, SeriesRef};

/// Fetch one series and write its TSV file.
///
/// Nothing is written when the fetch fails.
pub async fn export_one(
    catalog: &DiscoveryCatalog,
    series: &SeriesRef,
    writer: &LinkWriter,
) -> Result<(PathBuf, usize)> {
    let records = catalog.fetch_all(series).await?;
    let path = writer.write_series(series, &records)?;
    Ok((path, records.len()))
}

/// Export every series in order.
pub async fn export_series(
    catalog: &DiscoveryCatalog,
    series_list: &[SeriesRef],
    writer: &LinkWriter,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for series in series_list {
        let outcome = match export_one(catalog, series, writer).await {
            Ok((path, records)) => {
                info!(series = %series, records, path = %path.display(), "Series exported");
                ExportOutcome::Exported { path, records }
            }
            Err(error) => {
                warn!(series = %series, %error, "Series skipped");
                ExportOutcome::Failed(error)
            }
        };
        summary.push(series.as_str(), outcome);
    }

    summary
}

/// Read a series list file and export every series in it.
///
/// # Errors
/// Only reading or parsing the list itself fails the run.
pub async fn export_series_file(
    catalog: &DiscoveryCatalog,
    series_file: &Path,
    writer: &LinkWriter,
) -> Result<RunSummary> {
    let series_list = parse_series_list(&read_text(series_file)?)?;
    info!(
        count = series_list.len(),
        file = %series_file.display(),
        "Series list loaded"
    );
    Ok(export_series(catalog, &series_list, writer).await)
}

/// Turn every `*.txt` reference list in `input_dir` into `<stem>.tsv`.
///
/// No API requests are made; the references are written as they appear.
/// Files are processed in name order.
pub fn export_reference_files(input_dir: &Path, writer: &LinkWriter) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(input_dir).map_err(|e| DiscoveryError::io(input_dir, e))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DiscoveryError::io(input_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            inputs.push(path);
        }
    }
    inputs.sort();

    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some(stem) = input.file_stem().and_then(|s| s.to_str()) else {
            warn!(file = %input.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        let references = parse_reference_list(&read_text(&input)?);
        let path = writer.write_references(stem, &references)?;
        info!(
            file = %input.display(),
            references = references.len(),
            path = %path.display(),
            "Reference list exported"
        );
        written.push(path);
    }

    Ok(written)
}

/// Download the XML details of each record id into `<id>.xml`.
///
/// The catalog's page delay is applied between consecutive requests.
pub async fn download_details(
    catalog: &DiscoveryCatalog,
    record_ids: &[String],
    writer: &LinkWriter,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for (index, record_id) in record_ids.iter().enumerate() {
        if index > 0 {
            catalog.pause().await;
        }

        let result = match catalog.record_details_xml(record_id).await {
            Ok(xml) => writer.write_details_xml(record_id, &xml),
            Err(error) => Err(error),
        };

        let outcome = match result {
            Ok(path) => {
                info!(
                    progress = %format!("{}/{}", index + 1, record_ids.len()),
                    record = %record_id,
                    "Details saved"
                );
                ExportOutcome::Exported { path, records: 1 }
            }
            Err(error) => {
                warn!(record = %record_id, %error, "Details not retrieved");
                ExportOutcome::Failed(error)
            }
        };
        summary.push(record_id.as_str(), outcome);
    }

    summary
}

/// Read a reference list file and download details for every entry.
pub async fn download_details_file(
    catalog: &DiscoveryCatalog,
    ids_file: &Path,
    writer: &LinkWriter,
) -> Result<RunSummary> {
    let record_ids = parse_reference_list(&read_text(ids_file)?);
    Ok(download_details(catalog, &record_ids, writer).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientConfig, DiscoveryClient, DEFAULT_DETAILS_URL};
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_for(server: &MockServer) -> DiscoveryCatalog {
        let config = ClientConfig {
            search_url: format!("{}/API/search/records", server.uri()),
            details_url: format!("{}/details/", server.uri()),
            page_delay: Duration::ZERO,
            ..ClientConfig::default()
        };
        DiscoveryCatalog::with_client(DiscoveryClient::with_config(config).unwrap())
    }

    async fn mount_series(server: &MockServer, series: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/API/search/records"))
            .and(query_param("sps.recordSeries", series))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    fn series(names: &[&str]) -> Vec<SeriesRef> {
        names.iter().map(|n| SeriesRef::new(n).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_export_series_skips_failures_and_continues() {
        let server = MockServer::start().await;
        mount_series(
            &server,
            "PREM 8",
            200,
            serde_json::json!({"records": [{"id": "C1"}, {"id": "C2"}], "count": 2, "nextBatchMark": ""}),
        )
        .await;
        mount_series(&server, "WO 1", 500, serde_json::json!({})).await;
        mount_series(
            &server,
            "War Office",
            200,
            serde_json::json!({"records": [], "count": 0, "nextBatchMark": ""}),
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let writer = LinkWriter::new(dir.path(), DEFAULT_DETAILS_URL);
        let catalog = catalog_for(&server);

        let summary =
            export_series(&catalog, &series(&["PREM 8", "WO 1", "War Office"]), &writer).await;

        assert_eq!(summary.exported(), 2);
        let failed: Vec<&str> = summary.failed().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, vec!["WO 1"]);

        assert_eq!(
            std::fs::read_to_string(dir.path().join("PREM_8.tsv")).unwrap(),
            "https://discovery.nationalarchives.gov.uk/API/records/v1/details/C1\tC1\n\
             https://discovery.nationalarchives.gov.uk/API/records/v1/details/C2\tC2"
        );
        assert!(!dir.path().join("WO_1.tsv").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("War_Office.tsv")).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_export_series_file_reads_list() {
        let server = MockServer::start().await;
        mount_series(
            &server,
            "CAB 128",
            200,
            serde_json::json!({"records": [{"id": "C5"}], "count": 1, "nextBatchMark": ""}),
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("series.txt");
        std::fs::write(&list, "CAB 128\n\n").unwrap();
        let writer = LinkWriter::new(dir.path().join("output"), DEFAULT_DETAILS_URL);

        let summary = export_series_file(&catalog_for(&server), &list, &writer)
            .await
            .unwrap();
        assert!(summary.is_success());
        assert!(dir.path().join("output").join("CAB_128.tsv").exists());
    }

    #[tokio::test]
    async fn test_export_series_file_missing_list() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let writer = LinkWriter::new(dir.path(), DEFAULT_DETAILS_URL);

        let result =
            export_series_file(&catalog_for(&server), &dir.path().join("nope.txt"), &writer).await;
        assert!(matches!(result, Err(DiscoveryError::Io { .. })));
    }

    #[test]
    fn test_export_reference_files() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("b.txt"), "ID: C2\n\nC3\n").unwrap();
        std::fs::write(input.path().join("a.txt"), "C1").unwrap();
        std::fs::write(input.path().join("notes.md"), "C9").unwrap();

        let writer = LinkWriter::new(output.path(), "http://d/");
        let written = export_reference_files(input.path(), &writer).unwrap();

        assert_eq!(
            written,
            vec![output.path().join("a.tsv"), output.path().join("b.tsv")]
        );
        assert_eq!(
            std::fs::read_to_string(output.path().join("b.tsv")).unwrap(),
            "http://d/C2\tC2\nhttp://d/C3\tC3"
        );
    }

    #[tokio::test]
    async fn test_download_details_continues_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/details/C1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<c1/>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/details/C2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/details/C3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<c3/>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let writer = LinkWriter::new(dir.path(), DEFAULT_DETAILS_URL);
        let ids = vec!["C1".to_string(), "C2".to_string(), "C3".to_string()];

        let summary = download_details(&catalog_for(&server), &ids, &writer).await;

        assert_eq!(summary.exported(), 2);
        assert_eq!(summary.failed().count(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("C3.xml")).unwrap(),
            "<c3/>"
        );
        assert!(!dir.path().join("C2.xml").exists());
    }
}
