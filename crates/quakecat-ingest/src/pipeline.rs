//! Ingestion pipeline
//!
//! Drives the [`RecordParser`] over a one-pass row stream and builds a
//! [`Catalogue`] snapshot.
//!
//! # Failure policy
//! - A row that fails validation is logged, recorded as a [`Rejection`], and
//!   skipped. One bad row never aborts the load.
//! - A read failure of the source aborts the whole load with
//!   [`IngestError::SourceUnavailable`]. Records accumulated before the
//!   failure are discarded.

use std::path::Path;

use futures::{Stream, StreamExt};
use quakecat_common::{Catalogue, Record};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{IngestError, SourceError};
use crate::parser::{RawRow, RecordParser, RejectionReason};
use crate::source::csv_source;

/// Default number of rejections kept on an [`IngestOutcome`]
pub const DEFAULT_REJECTION_LIMIT: usize = 1000;

/// How ingested records get their ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// The catalogue assigns `"1"`, `"2"`, ... in source order
    #[default]
    Sequential,
    /// Keep the latitude-derived id from the parser; colliding rows are rejected
    SourceDerived,
}

impl std::str::FromStr for IdScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "counter" => Ok(IdScheme::Sequential),
            "source" | "source_derived" | "source-derived" | "latitude" => {
                Ok(IdScheme::SourceDerived)
            },
            _ => Err(anyhow::anyhow!(
                "Invalid id scheme: {}. Must be 'sequential' or 'source'",
                s
            )),
        }
    }
}

impl std::fmt::Display for IdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdScheme::Sequential => write!(f, "sequential"),
            IdScheme::SourceDerived => write!(f, "source"),
        }
    }
}

/// A source row excluded from the catalogue
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// 1-based position of the row in the stream (header not counted)
    pub row: usize,
    pub fields: RawRow,
    pub reason: RejectionReason,
}

/// Result of a completed load
#[derive(Debug)]
pub struct IngestOutcome {
    pub catalogue: Catalogue,
    pub accepted: usize,
    pub rejected: usize,
    /// The first rejections, up to the pipeline's rejection limit
    pub rejections: Vec<Rejection>,
}

/// One-shot loader from a row stream into a catalogue
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    parser: RecordParser,
    id_scheme: IdScheme,
    rejection_limit: usize,
}

impl Default for IngestionPipeline {
    fn default() -> Self {
        Self {
            parser: RecordParser::new(),
            id_scheme: IdScheme::default(),
            rejection_limit: DEFAULT_REJECTION_LIMIT,
        }
    }
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_id_scheme(mut self, id_scheme: IdScheme) -> Self {
        self.id_scheme = id_scheme;
        self
    }

    pub fn with_rejection_limit(mut self, limit: usize) -> Self {
        self.rejection_limit = limit;
        self
    }

    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }

    /// Open `path` as CSV and load it
    pub async fn ingest_file(&self, path: impl AsRef<Path>) -> Result<IngestOutcome, IngestError> {
        let path = path.as_ref();
        let rows = csv_source(path).await?;
        self.load(path.display().to_string(), rows).await
    }

    /// Load an arbitrary row stream
    pub async fn run<S>(&self, rows: S) -> Result<IngestOutcome, IngestError>
    where
        S: Stream<Item = Result<RawRow, SourceError>>,
    {
        self.load("<stream>".to_string(), rows).await
    }

    #[tracing::instrument(skip(self, rows), fields(id_scheme = %self.id_scheme))]
    async fn load<S>(&self, source_name: String, rows: S) -> Result<IngestOutcome, IngestError>
    where
        S: Stream<Item = Result<RawRow, SourceError>>,
    {
        let mut rows = std::pin::pin!(rows);
        let mut catalogue = Catalogue::new();
        let mut accepted = 0usize;
        let mut rejections = Vec::new();
        let mut rejected = 0usize;
        let mut row_number = 0usize;

        while let Some(item) = rows.next().await {
            row_number += 1;

            let outcome = match item {
                Ok(fields) => match self.parser.parse(&fields) {
                    Ok(record) => self.accept(&mut catalogue, record).map_err(|r| (fields, r)),
                    Err(reason) => Err((fields, reason)),
                },
                Err(SourceError::Malformed(message)) => {
                    Err((RawRow::new(), RejectionReason::MalformedRow(message)))
                },
                Err(SourceError::Io(err)) => {
                    error!(
                        source = %source_name,
                        row = row_number,
                        error = %err,
                        "Error reading source, discarding partial load"
                    );
                    return Err(IngestError::source_unavailable(source_name, err));
                },
            };

            match outcome {
                Ok(()) => accepted += 1,
                Err((fields, reason)) => {
                    warn!(
                        row = row_number,
                        fields = %serde_json::to_string(&fields).unwrap_or_default(),
                        reason = %reason,
                        "Rejected source row"
                    );
                    rejected += 1;
                    if rejections.len() < self.rejection_limit {
                        rejections.push(Rejection {
                            row: row_number,
                            fields,
                            reason,
                        });
                    }
                },
            }
        }

        info!(
            source = %source_name,
            accepted,
            rejected,
            "Source successfully processed"
        );

        Ok(IngestOutcome {
            catalogue,
            accepted,
            rejected,
            rejections,
        })
    }

    fn accept(&self, catalogue: &mut Catalogue, record: Record) -> Result<(), RejectionReason> {
        match self.id_scheme {
            IdScheme::Sequential => {
                catalogue.insert(record.location, record.magnitude, record.date);
                Ok(())
            },
            IdScheme::SourceDerived => catalogue
                .push_ingested(record)
                .map_err(|err| RejectionReason::DuplicateId(err.id().to_string())),
        }
    }
}
