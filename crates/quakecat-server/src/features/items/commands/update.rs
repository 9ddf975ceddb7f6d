//! Update item command
//!
//! Replaces every editable field of an existing item. The id never changes.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::facade::{FacadeError, ItemFields, QueryFacade};
use crate::features::items::types::ItemResponse;
use crate::features::shared::validation::{
    validate_date, validate_id, validate_location, validate_magnitude, FieldError,
};

/// Command to update an existing item
///
/// The id comes from the request path; any id in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemCommand {
    #[serde(default, skip_deserializing)]
    pub id: String,
    pub location: String,
    pub magnitude: f64,
    pub date: String,
}

pub type UpdateItemResponse = ItemResponse;

#[derive(Debug, thiserror::Error)]
pub enum UpdateItemError {
    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error(transparent)]
    Facade(#[from] FacadeError),
}

impl Request<Result<UpdateItemResponse, UpdateItemError>> for UpdateItemCommand {}

impl UpdateItemCommand {
    pub fn validate(&self) -> Result<(), UpdateItemError> {
        validate_id(&self.id)?;
        validate_location(&self.location)?;
        validate_magnitude(self.magnitude)?;
        validate_date(&self.date)?;
        Ok(())
    }
}

#[tracing::instrument(skip(facade, command), fields(item_id = %command.id))]
pub async fn handle(
    facade: QueryFacade,
    command: UpdateItemCommand,
) -> Result<UpdateItemResponse, UpdateItemError> {
    command.validate()?;

    let record = facade
        .update(
            &command.id,
            ItemFields {
                location: command.location,
                magnitude: command.magnitude,
                date: command.date,
            },
        )
        .await?;

    tracing::info!(item_id = %record.id, "Item updated");

    Ok(record.into())
}
