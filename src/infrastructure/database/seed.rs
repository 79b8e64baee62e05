//! Bulk catalog seeding from a JSON file
//!
//! The file holds a JSON array of games in the same camelCase shape the API
//! returns, minus `id` and the timestamps. Every tag is validated before any
//! row is written, and the whole set goes through one `insert_many`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::game::UnknownTag;
use crate::domain::{AgeRating, DomainError, GameRepository, Genre, NewGame, Platform};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Game #{index} ({title}): {source}")]
    InvalidGame {
        index: usize,
        title: String,
        source: UnknownTag,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One entry of the seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedGame {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub publisher: String,
    pub developer: String,
    pub price: f64,
    pub rating: f64,
    pub release_date: DateTime<Utc>,
    pub age_rating: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl SeedGame {
    pub fn into_new_game(self) -> Result<NewGame, UnknownTag> {
        let age_rating = self.age_rating.parse::<AgeRating>()?;
        let genres = self
            .genres
            .iter()
            .map(|g| g.parse::<Genre>())
            .collect::<Result<Vec<_>, _>>()?;
        let platforms = self
            .platforms
            .iter()
            .map(|p| p.parse::<Platform>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewGame {
            title: self.title,
            description: self.description,
            image: self.image,
            publisher: self.publisher,
            developer: self.developer,
            price: self.price,
            rating: self.rating,
            release_date: self.release_date,
            age_rating,
            genres,
            platforms,
        })
    }
}

/// Parse and validate a seed document.
pub fn parse_seed(raw: &str) -> Result<Vec<NewGame>, SeedError> {
    let entries: Vec<SeedGame> = serde_json::from_str(raw)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<NewGame, SeedError> {
            let title = entry.title.clone();
            let game = entry
                .into_new_game()
                .map_err(|source| SeedError::InvalidGame { index, title, source })?;
            game.validate()?;
            Ok(game)
        })
        .collect()
}

pub fn load_seed_file(path: &Path) -> Result<Vec<NewGame>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&raw)
}

/// Insert `games` in one batch. Returns the number of rows written.
pub async fn seed_games(repo: &dyn GameRepository, games: Vec<NewGame>) -> Result<u64, SeedError> {
    info!("Starting data upload: {} games", games.len());
    let inserted = repo.insert_many(games).await?;
    info!("Successfully added {} games to the database", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameFilter;
    use crate::infrastructure::storage::InMemoryGameRepository;

    const SAMPLE: &str = r#"[
        {
            "title": "Hollow Knight",
            "publisher": "Team Cherry",
            "developer": "Team Cherry",
            "price": 14.99,
            "rating": 9.1,
            "releaseDate": "2017-02-24T00:00:00Z",
            "ageRating": "E10Plus",
            "genres": ["Action", "Adventure", "Platformer"],
            "platforms": ["PC", "NintendoSwitch"]
        },
        {
            "title": "DOOM Eternal",
            "description": "Rip and tear.",
            "image": "/uploads/doom-eternal.jpg",
            "publisher": "Bethesda Softworks",
            "developer": "id Software",
            "price": 39.99,
            "rating": 8.9,
            "releaseDate": "2020-03-20T00:00:00Z",
            "ageRating": "M",
            "genres": ["Shooter"],
            "platforms": ["PC", "PlayStation", "Xbox"]
        }
    ]"#;

    #[test]
    fn parses_camel_case_entries() {
        let games = parse_seed(SAMPLE).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].age_rating, AgeRating::E10Plus);
        assert_eq!(games[0].description, None);
        assert_eq!(games[0].platforms, vec![Platform::PC, Platform::NintendoSwitch]);
        assert_eq!(games[1].genres, vec![Genre::Shooter]);
        assert_eq!(games[1].image.as_deref(), Some("/uploads/doom-eternal.jpg"));
    }

    #[test]
    fn unknown_tag_names_the_entry() {
        let raw = SAMPLE.replace("\"Shooter\"", "\"Roguelite\"");
        let err = parse_seed(&raw).unwrap_err();
        match err {
            SeedError::InvalidGame { index, title, source } => {
                assert_eq!(index, 1);
                assert_eq!(title, "DOOM Eternal");
                assert_eq!(source.value, "Roguelite");
            }
            other => panic!("expected invalid game, got {other}"),
        }
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let raw = SAMPLE.replace("\"rating\": 8.9", "\"rating\": 89");
        let err = parse_seed(&raw).unwrap_err();
        assert!(matches!(err, SeedError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn shipped_sample_is_valid() {
        let games = parse_seed(include_str!("../../../seeder/games.json")).unwrap();
        assert!(games.len() >= 10);
        assert!(games.iter().any(|g| g.age_rating == AgeRating::M));
        assert!(games.iter().any(|g| g.image.is_none()));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_seed_file(&dir.path().join("games.json")).unwrap_err();
        assert!(matches!(err, SeedError::Read { .. }));
    }

    #[tokio::test]
    async fn seeds_every_entry() {
        let repo = InMemoryGameRepository::new();
        let games = parse_seed(SAMPLE).unwrap();
        let inserted = seed_games(&repo, games).await.unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(repo.count(&GameFilter::new()).await.unwrap(), 2);
    }
}
