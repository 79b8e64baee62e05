//! Catalog module: game listing use-case
//!
//! Query types, the filter builder, and the `CatalogService` that drives the
//! repository.

pub mod filter_builder;
pub mod queries;
pub mod service;

pub use filter_builder::{build_filter, sort_mode, ADULT_INCLUSIVE_RATINGS};
pub use queries::{AdultContent, GameListQuery};
pub use service::{CatalogService, GamePage};
