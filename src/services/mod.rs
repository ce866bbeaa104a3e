pub mod catalog;
pub mod matcher;
pub mod providers;

pub use providers::{CatalogProvider, MovieBoxClient, SearchParams, StreamTarget};
