//! QuakeCat Server Library
//!
//! HTTP server for a catalogue of historical earthquakes.
//!
//! # Overview
//!
//! - **Facade**: [`facade::QueryFacade`] owns the in-memory catalogue and
//!   loads it from the CSV source exactly once, on first use
//! - **API Endpoints**: list, create, update, and delete under `/api/v1/items`
//! - **Configuration**: environment-based, see [`config::Config`]
//! - **Middleware**: CORS, request tracing, and compression
//!
//! # Architecture
//!
//! Each operation is a CQRS slice under [`features`]: a command or query
//! struct, its error enum, and a `handle(facade, request)` function. Routes
//! call the handlers directly; [`cqrs::build_mediator`] registers the same
//! handlers with a `mediator` for in-process dispatch.
//!
//! # Example
//!
//! ```no_run
//! use quakecat_ingest::IngestionPipeline;
//! use quakecat_server::{api, config::Config, facade::{CsvLoader, QueryFacade}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pipeline = IngestionPipeline::new().with_id_scheme(config.catalogue.id_scheme);
//!     let facade = QueryFacade::new(CsvLoader::new(&config.catalogue.source_path, pipeline));
//!     api::serve(facade, config).await
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod config;
pub mod cqrs;
pub mod facade;
pub mod features;
pub mod middleware;

pub use facade::{CatalogueLoader, CsvLoader, FacadeError, ItemFields, LoadState, QueryFacade};
