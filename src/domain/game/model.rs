//! Game catalog domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Age-rating category, ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeRating {
    /// Everyone
    E,
    /// Everyone 10+
    E10Plus,
    /// Teen
    T,
    /// Mature 17+
    M,
    /// Adults only 18+
    AO,
}

impl AgeRating {
    pub const ALL: [AgeRating; 5] = [Self::E, Self::E10Plus, Self::T, Self::M, Self::AO];

    /// Categories shown when adult content is excluded.
    pub const NON_ADULT: [AgeRating; 3] = [Self::E, Self::E10Plus, Self::T];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E => "E",
            Self::E10Plus => "E10Plus",
            Self::T => "T",
            Self::M => "M",
            Self::AO => "AO",
        }
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeRating {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownTag::new("age rating", s))
    }
}

/// Genre tag attached to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    RPG,
    Strategy,
    Shooter,
    Simulation,
    Sports,
    Racing,
    Puzzle,
    Horror,
    Fighting,
    Platformer,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Self::Action,
        Self::Adventure,
        Self::RPG,
        Self::Strategy,
        Self::Shooter,
        Self::Simulation,
        Self::Sports,
        Self::Racing,
        Self::Puzzle,
        Self::Horror,
        Self::Fighting,
        Self::Platformer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::RPG => "RPG",
            Self::Strategy => "Strategy",
            Self::Shooter => "Shooter",
            Self::Simulation => "Simulation",
            Self::Sports => "Sports",
            Self::Racing => "Racing",
            Self::Puzzle => "Puzzle",
            Self::Horror => "Horror",
            Self::Fighting => "Fighting",
            Self::Platformer => "Platformer",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownTag::new("genre", s))
    }
}

/// Platform a game can be played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    PC,
    PlayStation,
    Xbox,
    NintendoSwitch,
    Mobile,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Self::PC,
        Self::PlayStation,
        Self::Xbox,
        Self::NintendoSwitch,
        Self::Mobile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PC => "PC",
            Self::PlayStation => "PlayStation",
            Self::Xbox => "Xbox",
            Self::NintendoSwitch => "NintendoSwitch",
            Self::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownTag::new("platform", s))
    }
}

/// A tag string that does not name any known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownTag {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Path under the uploads root (e.g. `/uploads/witcher3.jpg`)
    pub image: Option<String>,
    pub publisher: String,
    pub developer: String,
    pub price: f64,
    pub rating: f64,
    pub release_date: DateTime<Utc>,
    pub age_rating: AgeRating,
    pub genres: Vec<Genre>,
    pub platforms: Vec<Platform>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry before it is persisted (seeding only)
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub publisher: String,
    pub developer: String,
    pub price: f64,
    pub rating: f64,
    pub release_date: DateTime<Utc>,
    pub age_rating: AgeRating,
    pub genres: Vec<Genre>,
    pub platforms: Vec<Platform>,
}

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 10.0;

impl NewGame {
    /// Reject entries the catalog cannot list sensibly.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::Validation(format!(
                "{}: price must be a non-negative number, got {}",
                self.title, self.price
            )));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(DomainError::Validation(format!(
                "{}: rating must be within 0..={}, got {}",
                self.title, MAX_RATING, self.rating
            )));
        }
        Ok(())
    }
}
