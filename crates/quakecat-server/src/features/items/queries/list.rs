use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::facade::{FacadeError, QueryFacade};
use crate::features::items::types::ItemResponse;

/// List every live item in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItemsQuery {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemResponse>,
    pub total: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ListItemsError {
    #[error(transparent)]
    Facade(#[from] FacadeError),
}

impl Request<Result<ListItemsResponse, ListItemsError>> for ListItemsQuery {}

#[tracing::instrument(skip(facade, _query))]
pub async fn handle(
    facade: QueryFacade,
    _query: ListItemsQuery,
) -> Result<ListItemsResponse, ListItemsError> {
    let items: Vec<ItemResponse> = facade
        .list()
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(ListItemsResponse {
        total: items.len(),
        items,
    })
}
