//! In-memory game repository for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{DomainResult, Game, GameFilter, GameRepository, GameSort, NewGame};
use crate::shared::Pagination;

/// Keeps the catalog in a `DashMap` and evaluates filters with
/// [`GameFilter::matches`].
pub struct InMemoryGameRepository {
    games: DashMap<i32, Game>,
    id_counter: AtomicI32,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    /// Build a repository pre-populated with `games`, assigning ids in order.
    pub fn with_games(games: impl IntoIterator<Item = NewGame>) -> Self {
        let repo = Self::new();
        for game in games {
            repo.insert(game);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn insert(&self, game: NewGame) -> i32 {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        self.games.insert(
            id,
            Game {
                id,
                title: game.title,
                description: game.description,
                image: game.image,
                publisher: game.publisher,
                developer: game.developer,
                price: game.price,
                rating: game.rating,
                release_date: game.release_date,
                age_rating: game.age_rating,
                genres: game.genres,
                platforms: game.platforms,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    fn matching(&self, filter: &GameFilter) -> Vec<Game> {
        self.games
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn find_page(
        &self,
        filter: &GameFilter,
        sort: GameSort,
        pagination: Pagination,
    ) -> DomainResult<Vec<Game>> {
        let order = sort.order();
        let mut games = self.matching(filter);
        games.sort_by(|a, b| order.compare(a, b));

        let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
        Ok(games.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &GameFilter) -> DomainResult<u64> {
        Ok(self
            .games
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count() as u64)
    }

    async fn insert_many(&self, games: Vec<NewGame>) -> DomainResult<u64> {
        let inserted = games.len() as u64;
        for game in games {
            self.insert(game);
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::{AgeRating, GamePredicate, Genre, Platform};

    fn new_game(title: &str, price: f64, year: i32, genres: Vec<Genre>) -> NewGame {
        NewGame {
            title: title.into(),
            description: None,
            image: None,
            publisher: "Devolver".into(),
            developer: "Indie House".into(),
            price,
            rating: 7.5,
            release_date: Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap(),
            age_rating: AgeRating::T,
            genres,
            platforms: vec![Platform::PC],
        }
    }

    fn catalog() -> InMemoryGameRepository {
        InMemoryGameRepository::with_games(vec![
            new_game("Alpha", 30.0, 2010, vec![Genre::Action]),
            new_game("Beta", 10.0, 2020, vec![Genre::RPG, Genre::Action]),
            new_game("Gamma", 20.0, 2015, vec![Genre::RPG]),
        ])
    }

    #[tokio::test]
    async fn default_sort_is_newest_first() {
        let repo = catalog();
        let page = repo
            .find_page(&GameFilter::new(), GameSort::default(), Pagination { limit: 10, offset: 0 })
            .await
            .unwrap();
        let titles: Vec<&str> = page.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Gamma", "Alpha"]);
    }

    #[tokio::test]
    async fn pagination_windows_sorted_results() {
        let repo = catalog();
        let page = repo
            .find_page(&GameFilter::new(), GameSort::LowPrice, Pagination { limit: 1, offset: 1 })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Gamma");

        let past_end = repo
            .find_page(&GameFilter::new(), GameSort::LowPrice, Pagination { limit: 10, offset: 10 })
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn count_uses_filter_only() {
        let repo = catalog();
        let mut filter = GameFilter::new();
        filter.push(GamePredicate::HasAllGenres(vec![Genre::RPG]));
        assert_eq!(repo.count(&filter).await.unwrap(), 2);
        assert_eq!(repo.count(&GameFilter::new()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_many_assigns_sequential_ids() {
        let repo = InMemoryGameRepository::new();
        let inserted = repo
            .insert_many(vec![
                new_game("One", 1.0, 2001, vec![]),
                new_game("Two", 2.0, 2002, vec![]),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(repo.len(), 2);

        let page = repo
            .find_page(&GameFilter::new(), GameSort::Oldest, Pagination { limit: 10, offset: 0 })
            .await
            .unwrap();
        let ids: Vec<i32> = page.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
