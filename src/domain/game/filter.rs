//! Persistence-agnostic predicate set over catalog entries
//!
//! A [`GameFilter`] is a conjunction of independent [`GamePredicate`]s. It is
//! plain data: repositories translate it into their native query form, and
//! [`GameFilter::matches`] evaluates it directly against a [`Game`].

use std::cmp::Ordering;

use super::model::{AgeRating, Game, Genre, Platform};

/// Case folding used by text search. Stores that keep a pre-folded copy of
/// searchable fields must fold with this so both sides agree.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// A single condition a game must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum GamePredicate {
    /// Case-insensitive substring of title, publisher or developer
    Search(String),
    /// `rating >= min`
    MinRating(f64),
    /// `price >= min` and/or `price <= max`; at least one bound is set
    PriceRange { min: Option<f64>, max: Option<f64> },
    /// Game carries every listed genre
    HasAllGenres(Vec<Genre>),
    /// Game is available on the platform
    HasPlatform(Platform),
    /// Game's age rating is one of the listed categories
    AgeRatingIn(Vec<AgeRating>),
}

impl GamePredicate {
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Self::Search(term) => {
                let needle = fold_case(term);
                [&game.title, &game.publisher, &game.developer]
                    .iter()
                    .any(|field| fold_case(field).contains(&needle))
            }
            Self::MinRating(min) => game.rating >= *min,
            Self::PriceRange { min, max } => {
                min.map_or(true, |min| game.price >= min) && max.map_or(true, |max| game.price <= max)
            }
            Self::HasAllGenres(genres) => genres.iter().all(|g| game.genres.contains(g)),
            Self::HasPlatform(platform) => game.platforms.contains(platform),
            Self::AgeRatingIn(ratings) => ratings.contains(&game.age_rating),
        }
    }
}

/// Conjunction of predicates. Empty means "no filtering at all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    predicates: Vec<GamePredicate>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: GamePredicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[GamePredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.predicates.iter().all(|p| p.matches(game))
    }
}

/// Listing sort mode as accepted on the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameSort {
    LowPrice,
    HighPrice,
    Oldest,
    #[default]
    Newest,
}

impl GameSort {
    pub const ALL: [GameSort; 4] = [Self::LowPrice, Self::HighPrice, Self::Oldest, Self::Newest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowPrice => "LOW_PRICE",
            Self::HighPrice => "HIGH_PRICE",
            Self::Oldest => "OLDEST",
            Self::Newest => "NEWEST",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// The single ordering key this mode sorts by.
    pub fn order(&self) -> SortOrder {
        match self {
            Self::LowPrice => SortOrder::new(SortKey::Price, SortDirection::Asc),
            Self::HighPrice => SortOrder::new(SortKey::Price, SortDirection::Desc),
            Self::Oldest => SortOrder::new(SortKey::ReleaseDate, SortDirection::Asc),
            Self::Newest => SortOrder::new(SortKey::ReleaseDate, SortDirection::Desc),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    ReleaseDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Compare two games by this order; ties fall back to ascending id.
    pub fn compare(&self, a: &Game, b: &Game) -> Ordering {
        let primary = match self.key {
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::ReleaseDate => a.release_date.cmp(&b.release_date),
        };
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn game(id: i32, price: f64, year: i32) -> Game {
        let released = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
        Game {
            id,
            title: "The Witcher 3: Wild Hunt".into(),
            description: None,
            image: None,
            publisher: "CD PROJEKT".into(),
            developer: "CD Projekt Red".into(),
            price,
            rating: 9.3,
            release_date: released,
            age_rating: AgeRating::M,
            genres: vec![Genre::RPG, Genre::Adventure],
            platforms: vec![Platform::PC, Platform::PlayStation],
            created_at: released,
            updated_at: released,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = GameFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&game(1, 0.0, 2000)));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let g = game(1, 30.0, 2015);
        assert!(GamePredicate::Search("WITCHER".into()).matches(&g));
        assert!(GamePredicate::Search("projekt".into()).matches(&g));
        assert!(GamePredicate::Search("red".into()).matches(&g));
        assert!(!GamePredicate::Search("cyberpunk".into()).matches(&g));
    }

    #[test]
    fn search_folds_non_ascii_letters() {
        let mut g = game(1, 20.0, 2006);
        g.title = "Ōkami HD".into();
        assert!(GamePredicate::Search("Ōkami".into()).matches(&g));
        assert!(GamePredicate::Search("ōKAMI".into()).matches(&g));
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let g = game(1, 20.0, 2015);
        let only_min = GamePredicate::PriceRange { min: Some(20.0), max: None };
        let only_max = GamePredicate::PriceRange { min: None, max: Some(19.99) };
        assert!(only_min.matches(&g));
        assert!(!only_max.matches(&g));
    }

    #[test]
    fn genres_require_superset() {
        let mut g = game(1, 30.0, 2015);
        g.genres = vec![Genre::RPG];
        let both = GamePredicate::HasAllGenres(vec![Genre::RPG, Genre::Action]);
        assert!(!both.matches(&g));

        g.genres = vec![Genre::Action, Genre::Horror, Genre::RPG];
        assert!(both.matches(&g));
    }

    #[test]
    fn all_predicates_must_hold() {
        let g = game(1, 30.0, 2015);
        let mut filter = GameFilter::new();
        filter.push(GamePredicate::HasPlatform(Platform::PC));
        filter.push(GamePredicate::AgeRatingIn(AgeRating::NON_ADULT.to_vec()));
        assert_eq!(filter.len(), 2);
        assert!(!filter.matches(&g));
    }

    #[test]
    fn sort_modes_map_to_one_key() {
        assert_eq!(GameSort::default(), GameSort::Newest);
        assert_eq!(GameSort::parse("LOW_PRICE"), Some(GameSort::LowPrice));
        assert_eq!(GameSort::parse("low_price"), None);
        assert_eq!(
            GameSort::Oldest.order(),
            SortOrder::new(SortKey::ReleaseDate, SortDirection::Asc)
        );
        assert_eq!(
            GameSort::HighPrice.order(),
            SortOrder::new(SortKey::Price, SortDirection::Desc)
        );
    }

    #[test]
    fn compare_breaks_ties_by_id() {
        let order = GameSort::HighPrice.order();
        let mut games = vec![game(3, 10.0, 2001), game(1, 10.0, 2002), game(2, 50.0, 2003)];
        games.sort_by(|a, b| order.compare(a, b));
        let ids: Vec<i32> = games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
