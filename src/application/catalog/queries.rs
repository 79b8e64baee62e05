//! Catalog query types
//!
//! Typed listing parameters, produced by the HTTP validation layer and
//! consumed by the filter builder.

use crate::domain::{GameSort, Genre, Platform};
use crate::shared::PageRequest;

/// Tri-state adult-content flag. Absent when the query key is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdultContent {
    /// `isAdultOnly=true`
    Include,
    /// `isAdultOnly` present with any other value
    Exclude,
}

impl AdultContent {
    /// Any present value other than the literal `"true"` excludes adult content.
    pub fn from_flag(raw: &str) -> Self {
        if raw == "true" {
            Self::Include
        } else {
            Self::Exclude
        }
    }
}

/// Validated parameters of `GET /games`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameListQuery {
    pub sort: Option<GameSort>,
    pub search_term: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub platform: Option<Platform>,
    pub rating: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub adult_content: Option<AdultContent>,
    pub page: PageRequest,
}
