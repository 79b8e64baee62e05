//! Game entity for the storefront catalog

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Age rating category
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AgeRating {
    #[sea_orm(string_value = "E")]
    E,
    #[sea_orm(string_value = "E10Plus")]
    E10Plus,
    #[sea_orm(string_value = "T")]
    T,
    #[sea_orm(string_value = "M")]
    M,
    #[sea_orm(string_value = "AO")]
    AO,
}

/// Set of tags stored as a JSON array of strings (e.g. `["RPG","Action"]`).
///
/// Membership queries match the quoted tag inside the serialized array, so
/// tags must never contain `"`, `%` or `_`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TagList(pub Vec<String>);

/// Game model - a single catalog entry
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: Option<String>,

    /// Upload path of the cover image
    pub image: Option<String>,

    pub publisher: String,

    pub developer: String,

    /// Case-folded copies of title, publisher and developer for text search
    pub title_folded: String,

    pub publisher_folded: String,

    pub developer_folded: String,

    #[sea_orm(column_type = "Double")]
    pub price: f64,

    #[sea_orm(column_type = "Double")]
    pub rating: f64,

    pub release_date: DateTime<Utc>,

    pub age_rating: AgeRating,

    #[sea_orm(column_type = "Json")]
    pub genres: TagList,

    #[sea_orm(column_type = "Json")]
    pub platforms: TagList,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
