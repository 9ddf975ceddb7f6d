//! Create item command
//!
//! Adds a single earthquake record to the catalogue under a freshly issued id.
//! The fields are validated here; the catalogue itself accepts anything.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::facade::{FacadeError, ItemFields, QueryFacade};
use crate::features::items::types::ItemResponse;
use crate::features::shared::validation::{
    validate_date, validate_location, validate_magnitude, FieldError,
};

/// Command to create a new item
///
/// # Examples
///
/// ```rust,ignore
/// use quakecat_server::features::items::commands::CreateItemCommand;
///
/// let command = CreateItemCommand {
///     location: "34.5, -118.2".to_string(),
///     magnitude: 5.1,
///     date: "1970-01-01T00:00:00Z".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemCommand {
    pub location: String,
    pub magnitude: f64,
    /// Stored exactly as given once it parses
    pub date: String,
}

pub type CreateItemResponse = ItemResponse;

/// Errors that can occur when creating an item
#[derive(Debug, thiserror::Error)]
pub enum CreateItemError {
    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error(transparent)]
    Facade(#[from] FacadeError),
}

impl Request<Result<CreateItemResponse, CreateItemError>> for CreateItemCommand {}

impl CreateItemCommand {
    pub fn validate(&self) -> Result<(), CreateItemError> {
        validate_location(&self.location)?;
        validate_magnitude(self.magnitude)?;
        validate_date(&self.date)?;
        Ok(())
    }
}

#[tracing::instrument(
    skip(facade, command),
    fields(location = %command.location, magnitude = command.magnitude)
)]
pub async fn handle(
    facade: QueryFacade,
    command: CreateItemCommand,
) -> Result<CreateItemResponse, CreateItemError> {
    command.validate()?;

    let record = facade
        .create(ItemFields {
            location: command.location,
            magnitude: command.magnitude,
            date: command.date,
        })
        .await?;

    tracing::info!(item_id = %record.id, "Item created");

    Ok(record.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use quakecat_common::Catalogue;

    fn command(location: &str, magnitude: f64, date: &str) -> CreateItemCommand {
        CreateItemCommand {
            location: location.to_string(),
            magnitude,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(command("X", 2.0, "2020-01-01").validate().is_ok());
    }

    #[test]
    fn test_validation_blank_location() {
        let result = command("  ", 2.0, "2020-01-01").validate();
        assert!(matches!(
            result,
            Err(CreateItemError::Validation(FieldError::LocationRequired))
        ));
    }

    #[test]
    fn test_validation_bad_date() {
        let result = command("X", 2.0, "not a date").validate();
        assert!(matches!(
            result,
            Err(CreateItemError::Validation(FieldError::DateInvalid(_)))
        ));
    }

    #[tokio::test]
    async fn test_handle_stores_date_as_supplied() {
        let facade = QueryFacade::with_catalogue(Catalogue::new());

        let created = handle(facade.clone(), command("X", 2.0, "2020-01-01")).await.unwrap();
        assert_eq!(created.id, "1");
        assert_eq!(created.date, "2020-01-01");

        let items = facade.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].location, "X");
        assert_eq!(items[0].magnitude, 2.0);
    }

    #[tokio::test]
    async fn test_handle_rejects_before_touching_catalogue() {
        let facade = QueryFacade::with_catalogue(Catalogue::new());
        let result = handle(facade.clone(), command("", 2.0, "2020-01-01")).await;
        assert!(result.is_err());
        assert!(facade.list().await.unwrap().is_empty());
    }
}
