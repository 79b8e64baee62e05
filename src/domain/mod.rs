pub mod game;

pub use game::{
    fold_case, AgeRating, Game, GameFilter, GamePredicate, GameRepository, GameSort, Genre, NewGame,
    Platform,
};

pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
