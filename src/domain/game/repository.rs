//! Game repository interface

use async_trait::async_trait;

use super::filter::{GameFilter, GameSort};
use super::model::{Game, NewGame};
use crate::domain::DomainResult;
use crate::shared::Pagination;

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// One page of games matching `filter`, in `sort` order.
    async fn find_page(
        &self,
        filter: &GameFilter,
        sort: GameSort,
        pagination: Pagination,
    ) -> DomainResult<Vec<Game>>;

    /// Number of games matching `filter`, ignoring pagination.
    async fn count(&self, filter: &GameFilter) -> DomainResult<u64>;

    /// Bulk insert used by the seeding command. Returns the number of rows written.
    async fn insert_many(&self, games: Vec<NewGame>) -> DomainResult<u64>;
}
