//! Query facade over the lazily loaded catalogue
//!
//! The facade is the only thing the transport talks to. It owns the
//! catalogue, loads it from its [`CatalogueLoader`] on first use, and
//! translates store errors into [`FacadeError`].
//!
//! # Load lifecycle
//!
//! `NotStarted → Running → Completed`. The first access of any operation
//! (or [`QueryFacade::preload`]) starts the load as a shared future; every
//! caller arriving while it runs awaits that same future and sees the same
//! outcome. If the load fails, all of them get
//! [`FacadeError::SourceUnavailable`], the attempt is discarded and the
//! facade returns to `NotStarted`, so only a later access retries. No
//! partially loaded catalogue is ever served.
//!
//! Dropping every caller mid-load leaves the attempt in place; the next
//! access resumes it rather than starting over.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use quakecat_common::{Catalogue, CatalogueError, Record};
use quakecat_ingest::{IngestError, IngestionPipeline};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{OnceCell, RwLock};
use tracing::{info, warn};

/// Produces the initial catalogue
#[async_trait]
pub trait CatalogueLoader: Send + Sync {
    async fn load(&self) -> Result<Catalogue, IngestError>;

    /// Human-readable name of the source, for logs
    fn describe(&self) -> String;
}

/// Loads the catalogue from a CSV file through the ingestion pipeline
pub struct CsvLoader {
    path: PathBuf,
    pipeline: IngestionPipeline,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>, pipeline: IngestionPipeline) -> Self {
        Self {
            path: path.into(),
            pipeline,
        }
    }
}

#[async_trait]
impl CatalogueLoader for CsvLoader {
    async fn load(&self) -> Result<Catalogue, IngestError> {
        let outcome = self.pipeline.ingest_file(&self.path).await?;
        if outcome.rejected > 0 {
            warn!(
                rejected = outcome.rejected,
                accepted = outcome.accepted,
                "Some source rows were rejected"
            );
        }
        Ok(outcome.catalogue)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Load state of the facade's catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    NotStarted,
    Running,
    Completed,
}

#[derive(Error, Debug)]
pub enum FacadeError {
    /// Shared by every caller that awaited the failed load
    #[error("Catalogue source unavailable: {0}")]
    SourceUnavailable(#[source] Arc<IngestError>),

    #[error("Item with id '{0}' not found")]
    NotFound(String),

    #[error("Item with id '{0}' already exists")]
    DuplicateId(String),
}

impl From<CatalogueError> for FacadeError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::NotFound(id) => FacadeError::NotFound(id),
            CatalogueError::DuplicateId(id) => FacadeError::DuplicateId(id),
        }
    }
}

/// The editable fields of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub location: String,
    pub magnitude: f64,
    pub date: String,
}

type SharedCatalogue = Arc<RwLock<Catalogue>>;
type LoadAttempt = Shared<BoxFuture<'static, Result<SharedCatalogue, Arc<IngestError>>>>;

struct Inner {
    loader: Arc<dyn CatalogueLoader>,
    catalogue: OnceCell<SharedCatalogue>,
    /// The load currently in flight, if any
    attempt: Mutex<Option<LoadAttempt>>,
}

impl Inner {
    fn attempt_slot(&self) -> MutexGuard<'_, Option<LoadAttempt>> {
        self.attempt.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle to the catalogue; cheap to clone
#[derive(Clone)]
pub struct QueryFacade {
    inner: Arc<Inner>,
}

impl QueryFacade {
    pub fn new(loader: impl CatalogueLoader + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader: Arc::new(loader),
                catalogue: OnceCell::new(),
                attempt: Mutex::new(None),
            }),
        }
    }

    /// A facade serving an already built catalogue
    pub fn with_catalogue(catalogue: Catalogue) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader: Arc::new(PreloadedSource),
                catalogue: OnceCell::new_with(Some(Arc::new(RwLock::new(catalogue)))),
                attempt: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> LoadState {
        if self.inner.catalogue.initialized() {
            LoadState::Completed
        } else if self.inner.attempt_slot().is_some() {
            LoadState::Running
        } else {
            LoadState::NotStarted
        }
    }

    /// Number of live records, or `None` while the catalogue is not loaded
    pub async fn record_count(&self) -> Option<usize> {
        match self.inner.catalogue.get() {
            Some(catalogue) => Some(catalogue.read().await.len()),
            None => None,
        }
    }

    /// Run the load now instead of waiting for the first request
    pub async fn preload(&self) -> Result<usize, FacadeError> {
        let catalogue = self.catalogue().await?;
        let count = catalogue.read().await.len();
        Ok(count)
    }

    pub async fn list(&self) -> Result<Vec<Record>, FacadeError> {
        let catalogue = self.catalogue().await?;
        let records = catalogue.read().await.list_all().to_vec();
        Ok(records)
    }

    pub async fn create(&self, fields: ItemFields) -> Result<Record, FacadeError> {
        let catalogue = self.catalogue().await?;
        let mut catalogue = catalogue.write().await;
        Ok(catalogue.insert(fields.location, fields.magnitude, fields.date))
    }

    pub async fn update(&self, id: &str, fields: ItemFields) -> Result<Record, FacadeError> {
        let catalogue = self.catalogue().await?;
        let mut catalogue = catalogue.write().await;
        Ok(catalogue.update_by_id(id, fields.location, fields.magnitude, fields.date)?)
    }

    pub async fn delete(&self, id: &str) -> Result<Record, FacadeError> {
        let catalogue = self.catalogue().await?;
        let mut catalogue = catalogue.write().await;
        Ok(catalogue.delete_by_id(id)?)
    }

    async fn catalogue(&self) -> Result<SharedCatalogue, FacadeError> {
        if let Some(catalogue) = self.inner.catalogue.get() {
            return Ok(catalogue.clone());
        }

        let attempt = {
            let mut slot = self.inner.attempt_slot();
            // A load may have finished while we waited for the slot
            if let Some(catalogue) = self.inner.catalogue.get() {
                return Ok(catalogue.clone());
            }
            slot.get_or_insert_with(|| start_load(self.inner.loader.clone()))
                .clone()
        };

        let outcome = attempt.clone().await;

        let mut slot = self.inner.attempt_slot();
        if let Ok(catalogue) = &outcome {
            // Only the first waiter's set succeeds; the rest hold the same Arc
            let _ = self.inner.catalogue.set(catalogue.clone());
        }
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
            *slot = None;
        }
        drop(slot);

        outcome.map_err(FacadeError::SourceUnavailable)
    }
}

fn start_load(loader: Arc<dyn CatalogueLoader>) -> LoadAttempt {
    async move {
        let source = loader.describe();
        info!(source = %source, "Loading catalogue");

        match loader.load().await {
            Ok(catalogue) => {
                info!(source = %source, records = catalogue.len(), "Catalogue ready");
                Ok(Arc::new(RwLock::new(catalogue)))
            },
            Err(err) => {
                tracing::error!(source = %source, error = %err, "Catalogue load failed");
                Err(Arc::new(err))
            },
        }
    }
    .boxed()
    .shared()
}

/// Loader for facades built with a ready catalogue; never invoked
struct PreloadedSource;

#[async_trait]
impl CatalogueLoader for PreloadedSource {
    async fn load(&self) -> Result<Catalogue, IngestError> {
        Ok(Catalogue::new())
    }

    fn describe(&self) -> String {
        "<preloaded>".to_string()
    }
}
