//! SeaORM implementation of GameRepository
//!
//! Translates the neutral [`GameFilter`] into a SeaORM [`Condition`]. Tag sets
//! are stored as JSON arrays, so tag membership is a `LIKE` on the quoted tag.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::{debug, info, warn};

use crate::domain::game::{SortDirection, SortKey};
use crate::domain::{
    fold_case, AgeRating, DomainError, DomainResult, Game, GameFilter, GamePredicate, GameRepository,
    GameSort, Genre, NewGame, Platform,
};
use crate::infrastructure::database::entities::game;
use crate::shared::{InfraError, Pagination};

/// Rows per INSERT statement when seeding; keeps well under SQLite's bind limit.
const INSERT_CHUNK: usize = 500;

pub struct SeaOrmGameRepository {
    db: DatabaseConnection,
}

impl SeaOrmGameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::from(e).into()
}

fn age_rating_to_domain(r: game::AgeRating) -> AgeRating {
    match r {
        game::AgeRating::E => AgeRating::E,
        game::AgeRating::E10Plus => AgeRating::E10Plus,
        game::AgeRating::T => AgeRating::T,
        game::AgeRating::M => AgeRating::M,
        game::AgeRating::AO => AgeRating::AO,
    }
}

fn age_rating_to_entity(r: AgeRating) -> game::AgeRating {
    match r {
        AgeRating::E => game::AgeRating::E,
        AgeRating::E10Plus => game::AgeRating::E10Plus,
        AgeRating::T => game::AgeRating::T,
        AgeRating::M => game::AgeRating::M,
        AgeRating::AO => game::AgeRating::AO,
    }
}

/// Parse stored tags, dropping (and logging) any the domain no longer knows.
fn parse_tags<T: std::str::FromStr>(game_id: i32, tags: game::TagList) -> Vec<T>
where
    T::Err: std::fmt::Display,
{
    tags.0
        .into_iter()
        .filter_map(|tag| match tag.parse() {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("Game {}: skipping stored tag: {}", game_id, e);
                None
            }
        })
        .collect()
}

fn model_to_domain(m: game::Model) -> Game {
    Game {
        id: m.id,
        genres: parse_tags::<Genre>(m.id, m.genres),
        platforms: parse_tags::<Platform>(m.id, m.platforms),
        title: m.title,
        description: m.description,
        image: m.image,
        publisher: m.publisher,
        developer: m.developer,
        price: m.price,
        rating: m.rating,
        release_date: m.release_date,
        age_rating: age_rating_to_domain(m.age_rating),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn new_game_to_active(g: NewGame) -> game::ActiveModel {
    let now = Utc::now();
    game::ActiveModel {
        title_folded: Set(fold_case(&g.title)),
        publisher_folded: Set(fold_case(&g.publisher)),
        developer_folded: Set(fold_case(&g.developer)),
        title: Set(g.title),
        description: Set(g.description),
        image: Set(g.image),
        publisher: Set(g.publisher),
        developer: Set(g.developer),
        price: Set(g.price),
        rating: Set(g.rating),
        release_date: Set(g.release_date),
        age_rating: Set(age_rating_to_entity(g.age_rating)),
        genres: Set(game::TagList(
            g.genres.iter().map(|t| t.as_str().to_string()).collect(),
        )),
        platforms: Set(game::TagList(
            g.platforms.iter().map(|t| t.as_str().to_string()).collect(),
        )),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

// ── Filter translation ──────────────────────────────────────────

/// Escape `LIKE` wildcards so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `LIKE` against a pre-folded column. The pattern must already be folded.
fn folded_contains(column: game::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::col(column).like(LikeExpr::new(pattern).escape('\\'))
}

/// Membership test against a JSON-array tag column.
fn has_tag(column: game::Column, tag: &str) -> sea_orm::sea_query::SimpleExpr {
    column.like(format!("%\"{}\"%", tag))
}

fn predicate_condition(predicate: &GamePredicate) -> Condition {
    match predicate {
        GamePredicate::Search(term) => {
            let pattern = format!("%{}%", escape_like(&fold_case(term)));
            Condition::any()
                .add(folded_contains(game::Column::TitleFolded, &pattern))
                .add(folded_contains(game::Column::PublisherFolded, &pattern))
                .add(folded_contains(game::Column::DeveloperFolded, &pattern))
        }
        GamePredicate::MinRating(min) => Condition::all().add(game::Column::Rating.gte(*min)),
        GamePredicate::PriceRange { min, max } => {
            let mut cond = Condition::all();
            if let Some(min) = min {
                cond = cond.add(game::Column::Price.gte(*min));
            }
            if let Some(max) = max {
                cond = cond.add(game::Column::Price.lte(*max));
            }
            cond
        }
        GamePredicate::HasAllGenres(genres) => genres
            .iter()
            .fold(Condition::all(), |cond, g| {
                cond.add(has_tag(game::Column::Genres, g.as_str()))
            }),
        GamePredicate::HasPlatform(platform) => {
            Condition::all().add(has_tag(game::Column::Platforms, platform.as_str()))
        }
        GamePredicate::AgeRatingIn(ratings) => Condition::all()
            .add(game::Column::AgeRating.is_in(ratings.iter().map(|r| r.as_str()))),
    }
}

/// Conjunction of every predicate in `filter`.
pub fn filter_condition(filter: &GameFilter) -> Condition {
    filter
        .predicates()
        .iter()
        .fold(Condition::all(), |cond, p| cond.add(predicate_condition(p)))
}

/// Base select with the filter applied. An empty filter adds no WHERE clause.
fn filtered(filter: &GameFilter) -> Select<game::Entity> {
    let query = game::Entity::find();
    if filter.is_empty() {
        query
    } else {
        query.filter(filter_condition(filter))
    }
}

fn apply_sort(query: Select<game::Entity>, sort: GameSort) -> Select<game::Entity> {
    let order = sort.order();
    let column = match order.key {
        SortKey::Price => game::Column::Price,
        SortKey::ReleaseDate => game::Column::ReleaseDate,
    };
    let direction = match order.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    query.order_by(column, direction).order_by_asc(game::Column::Id)
}

/// The full page query, exposed for inspection in tests.
pub fn page_query(filter: &GameFilter, sort: GameSort, pagination: Pagination) -> Select<game::Entity> {
    apply_sort(filtered(filter), sort)
        .offset(pagination.offset)
        .limit(pagination.limit)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl GameRepository for SeaOrmGameRepository {
    async fn find_page(
        &self,
        filter: &GameFilter,
        sort: GameSort,
        pagination: Pagination,
    ) -> DomainResult<Vec<Game>> {
        let models = page_query(filter, sort, pagination)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!("Fetched {} games", models.len());
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self, filter: &GameFilter) -> DomainResult<u64> {
        filtered(filter).count(&self.db).await.map_err(db_err)
    }

    async fn insert_many(&self, games: Vec<NewGame>) -> DomainResult<u64> {
        if games.is_empty() {
            return Ok(0);
        }

        let total = games.len() as u64;
        let models: Vec<game::ActiveModel> = games.into_iter().map(new_game_to_active).collect();

        let txn = self.db.begin().await.map_err(db_err)?;
        for chunk in models.chunks(INSERT_CHUNK) {
            game::Entity::insert_many(chunk.to_vec())
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)?;

        info!("Inserted {} games", total);
        Ok(total)
    }
}
