//! Game catalog DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{ValidationError, ValidationErrors};

use crate::application::{AdultContent, GameListQuery, GamePage};
use crate::domain::{Game, GameSort, Genre, Platform};
use crate::interfaces::http::common::{QueryLimits, ValidateQuery};
use crate::shared::{PageRequest, MAX_WINDOW};

/// Separator between genre tags in the `genres` parameter.
pub const GENRE_SEPARATOR: char = '|';

/// Query parameters of `GET /games`, exactly as sent by the client.
///
/// Every value arrives as a string; [`ValidateQuery`] turns them into a
/// [`GameListQuery`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RawGameListQuery {
    /// `LOW_PRICE`, `HIGH_PRICE`, `OLDEST` or `NEWEST` (default)
    pub sort: Option<String>,
    /// Case-insensitive substring of title, publisher or developer
    pub search_term: Option<String>,
    /// `|`-separated genres; a game must carry all of them
    pub genres: Option<String>,
    pub platform: Option<String>,
    /// Minimum rating, inclusive
    pub rating: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// `true` shows every age rating; any other value hides `M` and `AO`
    pub is_adult_only: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// Non-empty value, or `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn parse_number(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<String>,
) -> Option<f64> {
    let raw = present(value)?;
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.add(
                field,
                invalid("invalid_number", format!("'{}' is not a number", raw)),
            );
            None
        }
    }
}

fn parse_positive(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<String>,
) -> Option<u64> {
    let raw = present(value)?;
    match raw.trim().parse::<u64>() {
        Ok(n) if (1..=MAX_WINDOW).contains(&n) => Some(n),
        Ok(0) => {
            errors.add(field, invalid("out_of_range", "must be at least 1".to_string()));
            None
        }
        Ok(_) => {
            errors.add(
                field,
                invalid("out_of_range", format!("must not exceed {}", MAX_WINDOW)),
            );
            None
        }
        Err(_) => {
            errors.add(
                field,
                invalid("invalid_integer", format!("'{}' is not a positive integer", raw)),
            );
            None
        }
    }
}

fn allowed<T: Copy>(all: &[T], as_str: impl Fn(&T) -> &'static str) -> String {
    all.iter().map(as_str).collect::<Vec<_>>().join(", ")
}

impl ValidateQuery for RawGameListQuery {
    type Output = GameListQuery;

    fn validate_query(self, limits: &QueryLimits) -> Result<GameListQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let sort = self.sort.as_deref().and_then(|raw| {
            let parsed = GameSort::parse(raw);
            if parsed.is_none() {
                errors.add(
                    "sort",
                    invalid(
                        "invalid_sort",
                        format!("must be one of: {}", allowed(&GameSort::ALL, GameSort::as_str)),
                    ),
                );
            }
            parsed
        });

        let platform = self.platform.as_deref().and_then(|raw| match raw.parse::<Platform>() {
            Ok(p) => Some(p),
            Err(_) => {
                errors.add(
                    "platform",
                    invalid(
                        "invalid_platform",
                        format!("must be one of: {}", allowed(&Platform::ALL, Platform::as_str)),
                    ),
                );
                None
            }
        });

        let genres = present(&self.genres).and_then(|raw| {
            let mut parsed = Vec::new();
            for tag in raw.split(GENRE_SEPARATOR) {
                match tag.parse::<Genre>() {
                    Ok(g) => parsed.push(g),
                    Err(e) => errors.add("genres", invalid("invalid_genre", e.to_string())),
                }
            }
            (parsed.len() == raw.split(GENRE_SEPARATOR).count()).then_some(parsed)
        });

        let rating = parse_number(&mut errors, "rating", &self.rating);
        let min_price = parse_number(&mut errors, "minPrice", &self.min_price);
        let max_price = parse_number(&mut errors, "maxPrice", &self.max_price);

        let page = parse_positive(&mut errors, "page", &self.page);
        let per_page = parse_positive(&mut errors, "perPage", &self.per_page);
        if let (Some(requested), Some(max)) = (per_page, limits.max_per_page) {
            if requested > max {
                errors.add(
                    "perPage",
                    invalid("out_of_range", format!("must not exceed {}", max)),
                );
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GameListQuery {
            sort,
            search_term: present(&self.search_term).map(str::to_string),
            genres,
            platform,
            rating,
            min_price,
            max_price,
            adult_content: self.is_adult_only.as_deref().map(AdultContent::from_flag),
            page: PageRequest::new(page, per_page),
        })
    }
}

/// Catalog entry as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub publisher: String,
    pub developer: String,
    pub price: f64,
    pub rating: f64,
    pub release_date: DateTime<Utc>,
    /// `E`, `E10Plus`, `T`, `M` or `AO`
    pub age_rating: String,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Game> for GameDto {
    fn from(g: Game) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            image: g.image,
            publisher: g.publisher,
            developer: g.developer,
            price: g.price,
            rating: g.rating,
            release_date: g.release_date,
            age_rating: g.age_rating.as_str().to_string(),
            genres: g.genres.iter().map(|t| t.as_str().to_string()).collect(),
            platforms: g.platforms.iter().map(|t| t.as_str().to_string()).collect(),
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

/// One page of games plus the total number of matches
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameListResponse {
    pub games: Vec<GameDto>,
    /// Count of all matching games, ignoring pagination
    pub length: u64,
}

impl From<GamePage> for GameListResponse {
    fn from(page: GamePage) -> Self {
        Self {
            games: page.games.into_iter().map(GameDto::from).collect(),
            length: page.length,
        }
    }
}
