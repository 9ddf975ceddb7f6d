//! Error types for the catalogue store

use thiserror::Error;

/// Result type alias for catalogue operations
pub type CatalogueResult<T> = std::result::Result<T, CatalogueError>;

/// Errors raised by [`crate::Catalogue`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("Item with id '{0}' not found")]
    NotFound(String),

    #[error("Item with id '{0}' already exists")]
    DuplicateId(String),
}

impl CatalogueError {
    /// The id the failed operation referred to
    pub fn id(&self) -> &str {
        match self {
            CatalogueError::NotFound(id) | CatalogueError::DuplicateId(id) => id,
        }
    }
}
