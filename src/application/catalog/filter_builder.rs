//! Translates listing parameters into a [`GameFilter`]
//!
//! Every rule is independent: a parameter either contributes exactly one
//! predicate or nothing. No parameters means an empty filter.

use crate::domain::{AgeRating, GameFilter, GamePredicate, GameSort};

use super::queries::{AdultContent, GameListQuery};

/// Age ratings selected by `isAdultOnly=true`.
///
/// This lists every category, so it restricts nothing. Kept as-is for
/// compatibility with existing storefront clients.
pub const ADULT_INCLUSIVE_RATINGS: [AgeRating; 5] = [
    AgeRating::M,
    AgeRating::AO,
    AgeRating::E,
    AgeRating::E10Plus,
    AgeRating::T,
];

pub fn build_filter(query: &GameListQuery) -> GameFilter {
    let mut filter = GameFilter::new();

    if let Some(term) = query.search_term.as_deref().filter(|t| !t.is_empty()) {
        filter.push(GamePredicate::Search(term.to_string()));
    }

    if let Some(rating) = query.rating {
        filter.push(GamePredicate::MinRating(rating));
    }

    if query.min_price.is_some() || query.max_price.is_some() {
        filter.push(GamePredicate::PriceRange {
            min: query.min_price,
            max: query.max_price,
        });
    }

    if let Some(genres) = query.genres.as_ref().filter(|g| !g.is_empty()) {
        filter.push(GamePredicate::HasAllGenres(genres.clone()));
    }

    if let Some(platform) = query.platform {
        filter.push(GamePredicate::HasPlatform(platform));
    }

    if let Some(adult) = query.adult_content {
        let ratings = match adult {
            AdultContent::Include => ADULT_INCLUSIVE_RATINGS.to_vec(),
            AdultContent::Exclude => AgeRating::NON_ADULT.to_vec(),
        };
        filter.push(GamePredicate::AgeRatingIn(ratings));
    }

    filter
}

/// Sort mode for the listing; unset means newest first.
pub fn sort_mode(query: &GameListQuery) -> GameSort {
    query.sort.unwrap_or_default()
}
