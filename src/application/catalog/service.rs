//! Catalog listing service
//!
//! Builds the predicate set and page window for a listing request and runs
//! the paged fetch and the total count against the same filter.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainResult, Game, GameRepository};
use crate::shared::{Pagination, DEFAULT_PER_PAGE};

use super::filter_builder::{build_filter, sort_mode};
use super::queries::GameListQuery;

/// One page of listing results
#[derive(Debug, Clone)]
pub struct GamePage {
    pub games: Vec<Game>,
    /// Total matches across all pages
    pub length: u64,
}

pub struct CatalogService {
    repo: Arc<dyn GameRepository>,
    default_per_page: u64,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn GameRepository>) -> Self {
        Self {
            repo,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_default_per_page(mut self, per_page: u64) -> Self {
        self.default_per_page = per_page;
        self
    }

    pub fn repository(&self) -> &Arc<dyn GameRepository> {
        &self.repo
    }

    pub async fn list_games(&self, query: &GameListQuery) -> DomainResult<GamePage> {
        let filter = build_filter(query);
        let sort = sort_mode(query);
        let pagination = Pagination::resolve(query.page, self.default_per_page);

        debug!(
            predicates = filter.len(),
            sort = sort.as_str(),
            limit = pagination.limit,
            offset = pagination.offset,
            "Listing games"
        );
        metrics::counter!("catalog_queries_total", "sort" => sort.as_str()).increment(1);

        let (games, length) = tokio::try_join!(
            self.repo.find_page(&filter, sort, pagination),
            self.repo.count(&filter),
        )?;

        Ok(GamePage { games, length })
    }
}
