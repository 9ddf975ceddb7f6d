//! Domain types shared across QuakeCat

use serde::{Deserialize, Serialize};

/// One catalogued earthquake observation
///
/// `id` is unique among the live records of a [`crate::Catalogue`] and is
/// never changed by an update. `magnitude` is always finite and `date` is a
/// timestamp accepted by [`crate::timestamp::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub location: String,
    pub magnitude: f64,
    pub date: String,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        magnitude: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            magnitude,
            date: date.into(),
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} M{} at ({}) on {}",
            self.id, self.magnitude, self.location, self.date
        )
    }
}
