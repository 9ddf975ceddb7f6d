//! CSV row source
//!
//! The bulk source is read once, lazily, as a stream of header-keyed rows.

use std::path::Path;

use csv_async::{AsyncReaderBuilder, Trim};
use futures::stream::{BoxStream, StreamExt};
use tokio::io::AsyncRead;
use tracing::debug;

use crate::error::{IngestError, SourceError};
use crate::parser::RawRow;

/// One-pass stream of raw rows
pub type RowStream = BoxStream<'static, Result<RawRow, SourceError>>;

/// Open a CSV file and stream its rows
///
/// Fails with [`IngestError::SourceUnavailable`] if the file cannot be
/// opened. Read errors after that point surface as [`SourceError::Io`]
/// items on the stream.
pub async fn csv_source(path: impl AsRef<Path>) -> Result<RowStream, IngestError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|error| IngestError::source_unavailable(path.display().to_string(), error))?;

    debug!(path = %path.display(), "Opened CSV source");
    Ok(csv_rows(file))
}

/// Stream rows out of any CSV reader; the first line names the fields
pub fn csv_rows<R>(reader: R) -> RowStream
where
    R: AsyncRead + Unpin + Send + 'static,
{
    AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .create_deserializer(reader)
        .into_deserialize::<RawRow>()
        .map(|row| row.map_err(SourceError::from))
        .boxed()
}
