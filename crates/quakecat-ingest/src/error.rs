//! Ingestion error types

use thiserror::Error;

/// Fatal ingestion failure
///
/// Per-row problems never surface here; they become
/// [`crate::Rejection`]s on the outcome instead.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Source '{source_name}' is unavailable: {error}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        error: std::io::Error,
    },
}

impl IngestError {
    pub fn source_unavailable(source_name: impl Into<String>, error: std::io::Error) -> Self {
        IngestError::SourceUnavailable {
            source_name: source_name.into(),
            error,
        }
    }
}

/// Failure reading one item from a row stream
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying reader failed; the stream cannot continue
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    /// One row could not be decoded; later rows are still readable
    #[error("{0}")]
    Malformed(String),
}

impl From<csv_async::Error> for SourceError {
    fn from(err: csv_async::Error) -> Self {
        if matches!(err.kind(), csv_async::ErrorKind::Io(_)) {
            SourceError::Io(std::io::Error::other(err.to_string()))
        } else {
            SourceError::Malformed(err.to_string())
        }
    }
}
