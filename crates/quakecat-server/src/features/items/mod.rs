pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateItemCommand, CreateItemError, CreateItemResponse, DeleteItemCommand, DeleteItemError,
    DeleteItemResponse, UpdateItemCommand, UpdateItemError, UpdateItemResponse,
};
pub use queries::{ListItemsError, ListItemsQuery, ListItemsResponse};
pub use routes::items_routes;
pub use types::ItemResponse;
