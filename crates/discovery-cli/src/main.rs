//! Discovery Links command line
//!
//! Running without arguments reads `input/series.txt` and writes one
//! `<series>.tsv` per line into `output/`.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use discovery_core::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "discovery-links")]
#[command(about = "Export Discovery record links as TSV for EHRI bulk import")]
struct Cli {
    /// Directory receiving the exported files
    #[arg(long, global = true, default_value = "output")]
    output: PathBuf,

    /// Pause between consecutive API requests, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    delay_ms: u64,

    /// Records requested per search page
    #[arg(long, global = true, default_value_t = discovery_core::client::DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch every record of each listed series and write `<series>.tsv`
    Series {
        /// Newline-delimited list of series references
        #[arg(long, default_value = "input/series.txt")]
        input: PathBuf,
    },

    /// Convert `*.txt` reference lists to TSV without querying the API
    References {
        #[arg(long, default_value = "input")]
        input_dir: PathBuf,
    },

    /// Download the XML details document of each listed record
    Details {
        /// Newline-delimited list of record ids
        #[arg(long)]
        ids: PathBuf,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            page_size: self.page_size,
            page_delay: Duration::from_millis(self.delay_ms),
            timeout_secs: self.timeout_secs,
            ..ClientConfig::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();
    let command = cli.command.unwrap_or(Command::Series {
        input: PathBuf::from("input/series.txt"),
    });

    let success = match command {
        Command::Series { input } => commands::export_series(config, &input, &cli.output).await?,
        Command::References { input_dir } => {
            commands::export_references(config, &input_dir, &cli.output)?
        }
        Command::Details { ids } => commands::download_details(config, &ids, &cli.output).await?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let cli = Cli::parse_from(["discovery-links"]);
        assert_eq!(cli.output, PathBuf::from("output"));
        assert!(cli.command.is_none());

        let config = cli.client_config();
        assert_eq!(config.page_delay, Duration::from_secs(1));
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_series_with_overrides() {
        let cli = Cli::parse_from([
            "discovery-links",
            "series",
            "--input",
            "lists/wo.txt",
            "--output",
            "tsv",
            "--delay-ms",
            "250",
        ]);
        assert_eq!(cli.output, PathBuf::from("tsv"));
        assert_eq!(cli.client_config().page_delay, Duration::from_millis(250));
        match cli.command {
            Some(Command::Series { input }) => assert_eq!(input, PathBuf::from("lists/wo.txt")),
            _ => panic!("Expected series command"),
        }
    }

    #[test]
    fn test_details_requires_ids() {
        assert!(Cli::try_parse_from(["discovery-links", "details"]).is_err());
    }
}
