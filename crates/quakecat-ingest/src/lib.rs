//! QuakeCat Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads the earthquake CSV source into a [`quakecat_common::Catalogue`].
//!
//! # Components
//!
//! - **parser**: turns one raw row into a validated [`quakecat_common::Record`]
//! - **source**: streams raw rows out of a CSV file
//! - **pipeline**: drives the parser over a row stream, collecting rejections
//!
//! # Example
//!
//! ```no_run
//! use quakecat_ingest::IngestionPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let outcome = IngestionPipeline::new()
//!         .ingest_file("earthquakes1970-2014.csv")
//!         .await?;
//!     println!("{} records loaded", outcome.catalogue.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod parser;
pub mod pipeline;
pub mod source;

pub use error::{IngestError, SourceError};
pub use parser::{FieldNames, RawRow, RecordParser, RejectionReason};
pub use pipeline::{IdScheme, IngestOutcome, IngestionPipeline, Rejection};
pub use source::{csv_rows, csv_source, RowStream};
