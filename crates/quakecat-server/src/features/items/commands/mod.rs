pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateItemCommand, CreateItemError, CreateItemResponse};
pub use delete::{DeleteItemCommand, DeleteItemError, DeleteItemResponse};
pub use update::{UpdateItemCommand, UpdateItemError, UpdateItemResponse};
