//! QuakeCat Ingest - source file validation tool

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use quakecat_common::logging::{init_logging, LogConfig, LogLevel};
use quakecat_ingest::{IdScheme, IngestOutcome, IngestionPipeline};
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "quakecat-ingest")]
#[command(author, version, about = "QuakeCat earthquake source tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output (logs every rejected row)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV source exactly as the server would and report the result
    Check {
        /// Path to the CSV file
        path: PathBuf,

        /// How record ids are assigned (sequential, source)
        #[arg(long, default_value = "sequential", env = "QUAKECAT_ID_SCHEME")]
        id_scheme: IdScheme,

        /// Number of rejected rows to print
        #[arg(long, default_value_t = 10)]
        show_rejections: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Rejections are logged at warn; keep them quiet unless asked for
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Error
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("quakecat-ingest")
        .build()
        .merge_env()?;
    let _guard = init_logging(&log_config)?;

    match cli.command {
        Command::Check {
            path,
            id_scheme,
            show_rejections,
            json,
        } => {
            let outcome = check(&path, id_scheme, show_rejections).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&json_report(&outcome))?);
            } else {
                print!("{}", text_report(&outcome));
            }
        },
    }

    Ok(())
}

async fn check(path: &Path, id_scheme: IdScheme, show_rejections: usize) -> Result<IngestOutcome> {
    info!(path = %path.display(), %id_scheme, "Checking source");
    let outcome = IngestionPipeline::new()
        .with_id_scheme(id_scheme)
        .with_rejection_limit(show_rejections)
        .ingest_file(path)
        .await?;
    Ok(outcome)
}

fn text_report(outcome: &IngestOutcome) -> String {
    let mut report = format!(
        "Accepted: {}\nRejected: {}\n",
        outcome.accepted, outcome.rejected
    );

    if !outcome.rejections.is_empty() {
        report.push('\n');
        for rejection in &outcome.rejections {
            report.push_str(&format!("  row {:>6}: {}\n", rejection.row, rejection.reason));
        }
        let hidden = outcome.rejected - outcome.rejections.len();
        if hidden > 0 {
            report.push_str(&format!("  ... and {} more\n", hidden));
        }
    }

    report
}

fn json_report(outcome: &IngestOutcome) -> Value {
    let rejections: Vec<_> = outcome
        .rejections
        .iter()
        .map(|rejection| {
            json!({
                "row": rejection.row,
                "fields": rejection.fields,
                "reason": rejection.reason.to_string(),
            })
        })
        .collect();

    json!({
        "accepted": outcome.accepted,
        "rejected": outcome.rejected,
        "rejections": rejections,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use quakecat_ingest::IngestError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source_with_bad_rows() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "DateTime,Latitude,Longitude,Magnitude").unwrap();
        writeln!(file, "1970-01-01T00:00:00Z,34.5,-118.2,5.1").unwrap();
        writeln!(file, "bad,1,2,3").unwrap();
        writeln!(file, "1970-01-02T00:00:00Z,x,2,3").unwrap();
        writeln!(file, "never,1,2,3").unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_text_report_lists_shown_rejections_and_counts_the_rest() {
        let file = source_with_bad_rows();
        let outcome = check(file.path(), IdScheme::Sequential, 2).await.unwrap();

        let report = text_report(&outcome);

        assert!(report.starts_with("Accepted: 1\nRejected: 3\n"));
        assert!(report.contains("  row      2: Invalid timestamp 'bad'"));
        assert!(report.contains("  row      3: "));
        assert!(!report.contains("row      4"));
        assert!(report.ends_with("  ... and 1 more\n"));
    }

    #[tokio::test]
    async fn test_clean_source_has_no_rejection_section() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "DateTime,Latitude,Longitude,Magnitude").unwrap();
        writeln!(file, "1970-01-01T00:00:00Z,34.5,-118.2,5.1").unwrap();
        file.flush().unwrap();

        let outcome = check(file.path(), IdScheme::Sequential, 10).await.unwrap();

        assert_eq!(text_report(&outcome), "Accepted: 1\nRejected: 0\n");
    }

    #[tokio::test]
    async fn test_json_report_carries_rejected_fields() {
        let file = source_with_bad_rows();
        let outcome = check(file.path(), IdScheme::Sequential, 10).await.unwrap();

        let report = json_report(&outcome);

        assert_eq!(report["accepted"], 1);
        assert_eq!(report["rejected"], 3);
        assert_eq!(report["rejections"].as_array().unwrap().len(), 3);
        assert_eq!(report["rejections"][0]["row"], 2);
        assert_eq!(report["rejections"][0]["fields"]["DateTime"], "bad");
        assert_eq!(report["rejections"][0]["reason"], "Invalid timestamp 'bad'");
    }

    #[tokio::test]
    async fn test_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = check(&dir.path().join("absent.csv"), IdScheme::Sequential, 10)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::SourceUnavailable { .. })
        ));
    }
}
