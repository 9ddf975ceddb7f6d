//! Wire types shared by the item commands and queries

use quakecat_common::Record;
use serde::{Deserialize, Serialize};

/// An item as returned to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub location: String,
    pub magnitude: f64,
    pub date: String,
}

impl From<Record> for ItemResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            location: record.location,
            magnitude: record.magnitude,
            date: record.date,
        }
    }
}
