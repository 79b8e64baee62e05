//! HTTP REST API interfaces
//!
//! - `common`: response envelope and the validated query extractor
//! - `modules`: per-resource handlers, DTOs and middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
