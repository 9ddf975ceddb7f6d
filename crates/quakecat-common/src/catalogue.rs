//! In-memory catalogue store
//!
//! The catalogue owns the live records in insertion order. It performs no
//! validation of its own: callers at the boundary (the record parser for
//! ingested rows, command validation for API writes) are responsible for
//! handing it finite magnitudes and real dates.
//!
//! # Invariants
//! - Every live record has a distinct id.
//! - An id is never handed out twice within the lifetime of a catalogue, even
//!   after the record holding it has been deleted.
//! - A failed update or delete leaves the collection unchanged.

use std::collections::HashSet;

use crate::error::{CatalogueError, CatalogueResult};
use crate::types::Record;

/// Insertion-ordered collection of live [`Record`]s
#[derive(Debug, Default, Clone)]
pub struct Catalogue {
    records: Vec<Record>,
    /// Every id this catalogue has held, live or deleted
    issued: HashSet<String>,
    next_id: u64,
}

impl Catalogue {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            issued: HashSet::new(),
            next_id: 1,
        }
    }

    /// All live records in insertion order
    pub fn list_all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Append a new record under a freshly assigned id
    pub fn insert(
        &mut self,
        location: impl Into<String>,
        magnitude: f64,
        date: impl Into<String>,
    ) -> Record {
        let record = Record {
            id: self.allocate_id(),
            location: location.into(),
            magnitude,
            date: date.into(),
        };
        self.records.push(record.clone());
        record
    }

    /// Append a record that already carries an id
    ///
    /// Used by ingestion when ids are derived from the source rows. Fails with
    /// [`CatalogueError::DuplicateId`] if the id has been issued before.
    pub fn push_ingested(&mut self, record: Record) -> CatalogueResult<()> {
        if !self.issued.insert(record.id.clone()) {
            return Err(CatalogueError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Overwrite location, magnitude, and date of the record with `id`
    pub fn update_by_id(
        &mut self,
        id: &str,
        location: impl Into<String>,
        magnitude: f64,
        date: impl Into<String>,
    ) -> CatalogueResult<Record> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| CatalogueError::NotFound(id.to_string()))?;

        record.location = location.into();
        record.magnitude = magnitude;
        record.date = date.into();
        Ok(record.clone())
    }

    /// Remove the record with `id` and return it
    pub fn delete_by_id(&mut self, id: &str) -> CatalogueResult<Record> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| CatalogueError::NotFound(id.to_string()))?;

        Ok(self.records.remove(index))
    }

    fn allocate_id(&mut self) -> String {
        loop {
            let candidate = self.next_id.to_string();
            self.next_id += 1;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut catalogue = Catalogue::new();
        let first = catalogue.insert("A", 1.0, "2020-01-01");
        let second = catalogue.insert("B", 2.0, "2020-01-02");

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(catalogue.len(), 2);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut catalogue = Catalogue::new();
        catalogue.insert("A", 6.0, "2020-01-01");
        catalogue.insert("B", 1.0, "1990-01-01");
        catalogue.insert("C", 3.5, "2005-06-01");

        let locations: Vec<_> = catalogue.list_all().iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut catalogue = Catalogue::new();
        catalogue.insert("A", 1.0, "2020-01-01");
        let second = catalogue.insert("B", 2.0, "2020-01-01");
        catalogue.delete_by_id(&second.id).unwrap();

        let third = catalogue.insert("C", 3.0, "2020-01-01");
        assert_eq!(third.id, "3");
    }

    #[test]
    fn test_insert_skips_ids_taken_by_ingested_records() {
        let mut catalogue = Catalogue::new();
        catalogue.push_ingested(Record::new("1", "X", 1.0, "2020-01-01")).unwrap();
        catalogue.push_ingested(Record::new("2", "Y", 1.0, "2020-01-01")).unwrap();

        let inserted = catalogue.insert("Z", 1.0, "2020-01-01");
        assert_eq!(inserted.id, "3");
    }

    #[test]
    fn test_push_ingested_rejects_duplicate_id() {
        let mut catalogue = Catalogue::new();
        catalogue.push_ingested(Record::new("35.5", "X", 1.0, "2020-01-01")).unwrap();

        let result = catalogue.push_ingested(Record::new("35.5", "Y", 2.0, "2020-01-01"));
        assert_eq!(result, Err(CatalogueError::DuplicateId("35.5".to_string())));
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_update_overwrites_fields_and_keeps_id() {
        let mut catalogue = Catalogue::new();
        let record = catalogue.insert("X", 2.0, "2020-01-01");

        let updated = catalogue.update_by_id(&record.id, "Y", 3.0, "2021-01-01").unwrap();
        assert_eq!(updated, Record::new(record.id.clone(), "Y", 3.0, "2021-01-01"));
        assert_eq!(catalogue.get(&record.id), Some(&updated));
    }

    #[test]
    fn test_update_unknown_id_leaves_collection_unchanged() {
        let mut catalogue = Catalogue::new();
        catalogue.insert("X", 2.0, "2020-01-01");
        let before = catalogue.list_all().to_vec();

        let result = catalogue.update_by_id("99", "Y", 3.0, "2021-01-01");
        assert_eq!(result, Err(CatalogueError::NotFound("99".to_string())));
        assert_eq!(catalogue.list_all(), before.as_slice());
    }

    #[test]
    fn test_delete_returns_removed_record_and_second_delete_fails() {
        let mut catalogue = Catalogue::new();
        let record = catalogue.insert("X", 2.0, "2020-01-01");

        let removed = catalogue.delete_by_id(&record.id).unwrap();
        assert_eq!(removed, record);
        assert!(catalogue.is_empty());

        let again = catalogue.delete_by_id(&record.id);
        assert!(matches!(again, Err(CatalogueError::NotFound(_))));
    }
}
