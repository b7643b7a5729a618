//! Command handlers
//!
//! Each handler builds the catalog and writer from the shared
//! configuration, runs one export mode and reports the outcome. They return
//! `Ok(false)` when the run finished but some items failed.

use std::path::Path;

use anyhow::{Context, Result};
use discovery_core::pipeline;
use discovery_core::{ClientConfig, DiscoveryCatalog, DiscoveryClient, LinkWriter, RunSummary};
use discovery_core::{ExportOutcome, ExportReport};
use tracing::{error, info};

fn catalog_and_writer(config: ClientConfig, output: &Path) -> Result<(DiscoveryCatalog, LinkWriter)> {
    let writer = LinkWriter::new(output, config.details_url.clone());
    let client = DiscoveryClient::with_config(config).context("Failed to create HTTP client")?;
    Ok((DiscoveryCatalog::with_client(client), writer))
}

/// Export every series listed in `input`.
pub async fn export_series(config: ClientConfig, input: &Path, output: &Path) -> Result<bool> {
    let (catalog, writer) = catalog_and_writer(config, output)?;
    let summary = pipeline::export_series_file(&catalog, input, &writer)
        .await
        .with_context(|| format!("Failed to read series list {}", input.display()))?;
    Ok(report("series", &summary))
}

/// Convert reference lists in `input_dir`.
pub fn export_references(config: ClientConfig, input_dir: &Path, output: &Path) -> Result<bool> {
    let writer = LinkWriter::new(output, config.details_url);
    let written = pipeline::export_reference_files(input_dir, &writer)
        .with_context(|| format!("Failed to export reference lists from {}", input_dir.display()))?;
    info!(files = written.len(), "Reference lists exported");
    Ok(true)
}

/// Download details for every record listed in `ids`.
pub async fn download_details(config: ClientConfig, ids: &Path, output: &Path) -> Result<bool> {
    let (catalog, writer) = catalog_and_writer(config, output)?;
    let summary = pipeline::download_details_file(&catalog, ids, &writer)
        .await
        .with_context(|| format!("Failed to read record list {}", ids.display()))?;
    Ok(report("records", &summary))
}

fn report(kind: &str, summary: &RunSummary) -> bool {
    info!(
        kind,
        exported = summary.exported(),
        failed = summary.failed().count(),
        "Run finished"
    );
    for ExportReport { name, outcome } in summary.failed() {
        if let ExportOutcome::Failed(e) = outcome {
            error!(name = %name, error = %e, "Failed");
        }
    }
    summary.is_success()
}
