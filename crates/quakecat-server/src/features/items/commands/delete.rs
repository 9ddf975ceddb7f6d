//! Delete item command

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::facade::{FacadeError, QueryFacade};
use crate::features::items::types::ItemResponse;
use crate::features::shared::validation::{validate_id, FieldError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItemCommand {
    pub id: String,
}

/// The removed item
pub type DeleteItemResponse = ItemResponse;

#[derive(Debug, thiserror::Error)]
pub enum DeleteItemError {
    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error(transparent)]
    Facade(#[from] FacadeError),
}

impl Request<Result<DeleteItemResponse, DeleteItemError>> for DeleteItemCommand {}

impl DeleteItemCommand {
    pub fn validate(&self) -> Result<(), DeleteItemError> {
        validate_id(&self.id)?;
        Ok(())
    }
}

#[tracing::instrument(skip(facade, command), fields(item_id = %command.id))]
pub async fn handle(
    facade: QueryFacade,
    command: DeleteItemCommand,
) -> Result<DeleteItemResponse, DeleteItemError> {
    command.validate()?;

    let record = facade.delete(&command.id).await?;

    tracing::info!(item_id = %record.id, "Item deleted");

    Ok(record.into())
}
