//! QuakeCat Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared domain types, the in-memory catalogue store, and logging for the
//! QuakeCat workspace.
//!
//! # Overview
//!
//! - **Types**: the [`Record`] entity served by the API
//! - **Catalogue**: insertion-ordered store with CRUD operations
//! - **Timestamps**: the accepted date formats and their normalized form
//! - **Logging**: tracing subscriber bootstrap shared by all binaries
//!
//! # Example
//!
//! ```
//! use quakecat_common::Catalogue;
//!
//! let mut catalogue = Catalogue::new();
//! let record = catalogue.insert("34.5, -118.2", 5.1, "1970-01-01T00:00:00.000Z");
//! assert_eq!(record.id, "1");
//! assert_eq!(catalogue.list_all().len(), 1);
//! ```

pub mod catalogue;
pub mod error;
pub mod logging;
pub mod timestamp;
pub mod types;

// Re-export commonly used types
pub use catalogue::Catalogue;
pub use error::{CatalogueError, CatalogueResult};
pub use types::Record;
