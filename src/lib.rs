//! # Game Store Catalog
//!
//! Read-only game catalog API: `GET /games` filters, sorts and paginates
//! catalog entries stored in a relational database.
//!
//! ## Architecture
//!
//! - **domain**: Game entity, tag enums, the predicate set and the repository trait
//! - **application**: Query types, filter builder and `CatalogService`
//! - **infrastructure**: SeaORM persistence, migrations, seeding, in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Error types, pagination arithmetic, graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmGameRepository};

// Re-export API router
pub use interfaces::create_api_router;
