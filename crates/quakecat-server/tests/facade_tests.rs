//! QueryFacade lifecycle tests
//!
//! Covers the one-shot load (including failure and retry), and the CRUD
//! scenarios against a facade backed by a real CSV file.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quakecat_common::Catalogue;
use quakecat_ingest::{IdScheme, IngestError, IngestionPipeline};
use quakecat_server::{CatalogueLoader, CsvLoader, FacadeError, ItemFields, LoadState, QueryFacade};
use tempfile::NamedTempFile;

fn fields(location: &str, magnitude: f64, date: &str) -> ItemFields {
    ItemFields {
        location: location.to_string(),
        magnitude,
        date: date.to_string(),
    }
}

fn scenario_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(file, "DateTime,Latitude,Longitude,Magnitude").unwrap();
    writeln!(file, "1970-01-01T00:00:00Z,34.5,-118.2,5.1").unwrap();
    writeln!(file, "bad,1,2,3").unwrap();
    file.flush().unwrap();
    file
}

/// Fails the first `failures` loads, then succeeds with an empty catalogue
struct FlakyLoader {
    calls: Arc<AtomicUsize>,
    failures: usize,
}

#[async_trait]
impl CatalogueLoader for FlakyLoader {
    async fn load(&self) -> Result<Catalogue, IngestError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        if call < self.failures {
            return Err(IngestError::source_unavailable(
                "flaky.csv",
                std::io::Error::new(std::io::ErrorKind::NotFound, "not yet"),
            ));
        }
        Ok(Catalogue::new())
    }

    fn describe(&self) -> String {
        "flaky.csv".to_string()
    }
}

#[tokio::test]
async fn test_lazy_load_from_csv_on_first_list() {
    let file = scenario_csv();
    let facade = QueryFacade::new(CsvLoader::new(file.path(), IngestionPipeline::new()));
    assert_eq!(facade.state(), LoadState::NotStarted);

    let items = facade.list().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].location, "34.5, -118.2");
    assert_eq!(items[0].magnitude, 5.1);
    assert_eq!(facade.state(), LoadState::Completed);
}

#[tokio::test]
async fn test_failed_load_is_retried_on_next_access() {
    let calls = Arc::new(AtomicUsize::new(0));
    let facade = QueryFacade::new(FlakyLoader {
        calls: calls.clone(),
        failures: 1,
    });

    let first = facade.list().await;
    assert!(matches!(first, Err(FacadeError::SourceUnavailable(_))));
    assert_eq!(facade.state(), LoadState::NotStarted);

    let second = facade.list().await.unwrap();
    assert!(second.is_empty());
    assert_eq!(facade.state(), LoadState::Completed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Completed is terminal
    facade.list().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_failed_load() {
    let calls = Arc::new(AtomicUsize::new(0));
    let facade = QueryFacade::new(FlakyLoader {
        calls: calls.clone(),
        failures: usize::MAX,
    });

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let facade = facade.clone();
            tokio::spawn(async move { facade.list().await })
        })
        .collect();

    for task in tasks {
        assert!(matches!(
            task.await.unwrap(),
            Err(FacadeError::SourceUnavailable(_))
        ));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(facade.state(), LoadState::NotStarted);

    // The next access after the failure starts a fresh attempt
    assert!(facade.list().await.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_missing_source_surfaces_to_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let facade = QueryFacade::new(CsvLoader::new(
        dir.path().join("absent.csv"),
        IngestionPipeline::new(),
    ));

    assert!(matches!(
        facade.create(fields("X", 2.0, "2020-01-01")).await,
        Err(FacadeError::SourceUnavailable(_))
    ));
    assert!(matches!(
        facade.delete("1").await,
        Err(FacadeError::SourceUnavailable(_))
    ));
    assert_eq!(facade.record_count().await, None);
}

#[tokio::test]
async fn test_concurrent_create_on_cold_facade_loads_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let facade = QueryFacade::new(FlakyLoader {
        calls: calls.clone(),
        failures: 0,
    });

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let facade = facade.clone();
            tokio::spawn(async move {
                facade
                    .create(fields(&format!("loc-{}", n), 1.0, "2020-01-01"))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap().unwrap().id);
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 8);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(facade.list().await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_create_then_list_has_one_new_record() {
    let file = scenario_csv();
    let facade = QueryFacade::new(CsvLoader::new(file.path(), IngestionPipeline::new()));
    let before = facade.list().await.unwrap();

    let created = facade.create(fields("X", 2.0, "2020-01-01")).await.unwrap();
    let after = facade.list().await.unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert!(before.iter().all(|r| r.id != created.id));
    let added = after.iter().find(|r| r.id == created.id).unwrap();
    assert_eq!(added.location, "X");
    assert_eq!(added.magnitude, 2.0);
    assert_eq!(added.date, "2020-01-01");
}

#[tokio::test]
async fn test_update_and_delete_item_seven() {
    let mut catalogue = Catalogue::new();
    for n in 0..6 {
        catalogue.insert(format!("seed-{}", n), 1.0, "2000-01-01");
    }
    let facade = QueryFacade::with_catalogue(catalogue);

    let created = facade.create(fields("X", 2.0, "2020-01-01")).await.unwrap();
    assert_eq!(created.id, "7");

    let updated = facade.update("7", fields("Y", 3.0, "2021-01-01")).await.unwrap();
    assert_eq!(updated.id, "7");

    let listed = facade.list().await.unwrap();
    let seven = listed.iter().find(|r| r.id == "7").unwrap();
    assert_eq!(seven.location, "Y");
    assert_eq!(seven.magnitude, 3.0);
    assert_eq!(seven.date, "2021-01-01");

    let removed = facade.delete("7").await.unwrap();
    assert_eq!(removed.location, "Y");
    assert!(facade.list().await.unwrap().iter().all(|r| r.id != "7"));
    assert!(matches!(
        facade.delete("7").await,
        Err(FacadeError::NotFound(ref id)) if id == "7"
    ));

    // Freed ids are never handed out again
    let next = facade.create(fields("Z", 4.0, "2022-01-01")).await.unwrap();
    assert_eq!(next.id, "8");
}

#[tokio::test]
async fn test_source_derived_ids_through_facade() {
    let file = scenario_csv();
    let pipeline = IngestionPipeline::new().with_id_scheme(IdScheme::SourceDerived);
    let facade = QueryFacade::new(CsvLoader::new(file.path(), pipeline));

    let items = facade.list().await.unwrap();
    assert_eq!(items[0].id, "35.5");

    let created = facade.create(fields("X", 2.0, "2020-01-01")).await.unwrap();
    assert_ne!(created.id, "35.5");
}
