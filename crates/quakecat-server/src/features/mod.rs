//! Feature modules implementing the QuakeCat API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes. Commands and queries implement `mediator::Request` so they can
//! also be dispatched through [`crate::cqrs::build_mediator`].
//!
//! - **items**: list, create, update, and delete earthquake records

pub mod items;
pub mod shared;

use axum::Router;

use crate::facade::QueryFacade;

/// Creates the API router with all feature routes mounted
///
/// - `/items` - Earthquake catalogue
pub fn router(facade: QueryFacade) -> Router {
    Router::new()
        .nest("/items", items::items_routes())
        .with_state(facade)
}
