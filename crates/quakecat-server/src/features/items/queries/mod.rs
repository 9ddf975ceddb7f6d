pub mod list;

pub use list::{ListItemsError, ListItemsQuery, ListItemsResponse};
