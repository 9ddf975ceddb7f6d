//! Item API routes
//!
//! # Route Structure
//!
//! - `GET /api/v1/items` - List every item
//! - `POST /api/v1/items` - Create an item
//! - `PUT /api/v1/items/:id` - Replace an item's fields
//! - `DELETE /api/v1/items/:id` - Delete an item, returning it
//!
//! ```rust,ignore
//! use axum::Router;
//! use quakecat_server::features::items::routes::items_routes;
//!
//! let app = Router::new()
//!     .nest("/api/v1/items", items_routes())
//!     .with_state(facade);
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::facade::{FacadeError, QueryFacade};
use crate::features::shared::FieldError;

use super::{
    commands::{
        CreateItemCommand, CreateItemError, DeleteItemCommand, DeleteItemError,
        UpdateItemCommand, UpdateItemError,
    },
    queries::{ListItemsError, ListItemsQuery},
};

pub fn items_routes() -> Router<QueryFacade> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", put(update_item).delete(delete_item))
}

/// `POST /api/v1/items`
///
/// ```json
/// { "location": "34.5, -118.2", "magnitude": 5.1, "date": "1970-01-01T00:00:00Z" }
/// ```
///
/// - `201 Created` - Item created
/// - `400 Bad Request` - Validation error
/// - `503 Service Unavailable` - Catalogue source could not be loaded
#[tracing::instrument(skip(facade, command), fields(location = %command.location))]
async fn create_item(
    State(facade): State<QueryFacade>,
    Json(command): Json<CreateItemCommand>,
) -> Result<Response, ItemApiError> {
    let response = super::commands::create::handle(facade, command).await?;

    tracing::info!(item_id = %response.id, "Item created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

/// `PUT /api/v1/items/:id`
///
/// - `200 OK` - Item updated
/// - `400 Bad Request` - Validation error
/// - `404 Not Found` - No live item with that id
#[tracing::instrument(skip(facade, command), fields(item_id = %id))]
async fn update_item(
    State(facade): State<QueryFacade>,
    Path(id): Path<String>,
    Json(mut command): Json<UpdateItemCommand>,
) -> Result<Response, ItemApiError> {
    command.id = id;

    let response = super::commands::update::handle(facade, command).await?;

    tracing::info!(item_id = %response.id, "Item updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// `DELETE /api/v1/items/:id`
///
/// - `200 OK` - Item deleted, body carries the removed item
/// - `404 Not Found` - No live item with that id
#[tracing::instrument(skip(facade), fields(item_id = %id))]
async fn delete_item(
    State(facade): State<QueryFacade>,
    Path(id): Path<String>,
) -> Result<Response, ItemApiError> {
    let response = super::commands::delete::handle(facade, DeleteItemCommand { id }).await?;

    tracing::info!(item_id = %response.id, "Item deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// `GET /api/v1/items`
#[tracing::instrument(skip(facade))]
async fn list_items(State(facade): State<QueryFacade>) -> Result<Response, ItemApiError> {
    let response = super::queries::list::handle(facade, ListItemsQuery::default()).await?;

    tracing::debug!(count = response.total, "Items listed via API");

    let meta = json!({ "total": response.total });

    Ok(
        (StatusCode::OK, Json(ApiResponse::success_with_meta(response.items, meta)))
            .into_response(),
    )
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for item API endpoints
#[derive(Debug, thiserror::Error)]
enum ItemApiError {
    #[error(transparent)]
    Create(#[from] CreateItemError),
    #[error(transparent)]
    Update(#[from] UpdateItemError),
    #[error(transparent)]
    Delete(#[from] DeleteItemError),
    #[error(transparent)]
    List(#[from] ListItemsError),
}

enum Failure<'a> {
    Validation(&'a FieldError),
    Facade(&'a FacadeError),
}

impl ItemApiError {
    fn failure(&self) -> Failure<'_> {
        match self {
            ItemApiError::Create(CreateItemError::Validation(err))
            | ItemApiError::Update(UpdateItemError::Validation(err))
            | ItemApiError::Delete(DeleteItemError::Validation(err)) => Failure::Validation(err),
            ItemApiError::Create(CreateItemError::Facade(err))
            | ItemApiError::Update(UpdateItemError::Facade(err))
            | ItemApiError::Delete(DeleteItemError::Facade(err))
            | ItemApiError::List(ListItemsError::Facade(err)) => Failure::Facade(err),
        }
    }
}

impl IntoResponse for ItemApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.failure() {
            Failure::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", err.to_string()),
            ),
            Failure::Facade(FacadeError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", format!("Item with id '{}' not found", id)),
            ),
            Failure::Facade(FacadeError::DuplicateId(id)) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("CONFLICT", format!("Item with id '{}' already exists", id)),
            ),
            Failure::Facade(err @ &FacadeError::SourceUnavailable(_)) => {
                tracing::error!(error = %err, "Catalogue unavailable while serving request");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(
                        "SOURCE_UNAVAILABLE",
                        "The earthquake catalogue could not be loaded",
                    ),
                )
            },
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_errors_map_to_distinct_statuses() {
        let conflict = ItemApiError::Create(CreateItemError::Facade(FacadeError::DuplicateId(
            "35.5".to_string(),
        )));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let missing =
            ItemApiError::Delete(DeleteItemError::Facade(FacadeError::NotFound("9".to_string())));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}
