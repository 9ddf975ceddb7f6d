//! Earthquake source row parser
//!
//! Turns one raw CSV row (field name → raw text) into a typed [`Record`].
//!
//! # Row Format
//! ```text
//! DateTime,Latitude,Longitude,Depth,Magnitude,MagType,...
//! 1970/01/04 17:00:40.20,24.139,102.503,31,7.5,Ms,...
//! ```
//!
//! Only the timestamp, latitude, longitude and magnitude columns are read;
//! any other column is ignored. The parser is pure and does not log; the
//! pipeline decides what to do with a [`RejectionReason`].

use std::collections::BTreeMap;

use quakecat_common::{timestamp, Record};
use thiserror::Error;

/// One raw source row keyed by header name
pub type RawRow = BTreeMap<String, String>;

/// Why a row was excluded from the catalogue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("Invalid timestamp '{value}'")]
    InvalidDate { value: String },

    #[error("Invalid numeric field {field}='{value}'")]
    InvalidNumeric { field: String, value: String },

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Duplicate id '{0}'")]
    DuplicateId(String),
}

/// Header names of the four columns the parser reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
    pub magnitude: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            timestamp: "DateTime".to_string(),
            latitude: "Latitude".to_string(),
            longitude: "Longitude".to_string(),
            magnitude: "Magnitude".to_string(),
        }
    }
}

/// Parser for earthquake source rows
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    fields: FieldNames,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: FieldNames) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// Parse one raw row
    ///
    /// - `date` is the timestamp normalized to `YYYY-MM-DDTHH:MM:SS.sssZ`
    /// - `location` is `"<latitude>, <longitude>"` using the raw text
    /// - `id` is the parsed latitude plus one, e.g. `34.5` → `"35.5"`
    ///
    /// Two rows with the same latitude derive the same id; the pipeline
    /// either replaces these ids or rejects the later duplicate.
    pub fn parse(&self, row: &RawRow) -> Result<Record, RejectionReason> {
        let raw_timestamp = field(row, &self.fields.timestamp);
        let date = timestamp::parse_normalized(raw_timestamp).ok_or_else(|| {
            RejectionReason::InvalidDate {
                value: raw_timestamp.to_string(),
            }
        })?;

        let raw_latitude = field(row, &self.fields.latitude);
        let raw_longitude = field(row, &self.fields.longitude);

        let latitude = finite(&self.fields.latitude, raw_latitude)?;
        finite(&self.fields.longitude, raw_longitude)?;
        let magnitude = finite(&self.fields.magnitude, field(row, &self.fields.magnitude))?;

        Ok(Record {
            id: derive_id(latitude),
            location: format!("{}, {}", raw_latitude, raw_longitude),
            magnitude,
            date,
        })
    }
}

/// Missing columns read as empty text, which then fails validation
fn field<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

fn finite(name: &str, raw: &str) -> Result<f64, RejectionReason> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RejectionReason::InvalidNumeric {
            field: name.to_string(),
            value: raw.to_string(),
        })
}

fn derive_id(latitude: f64) -> String {
    (latitude + 1.0).to_string()
}
