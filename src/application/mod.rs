pub mod catalog;

// Re-export key types for convenience
pub use catalog::{AdultContent, CatalogService, GameListQuery, GamePage};
