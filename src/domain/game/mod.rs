//! Game aggregate
//!
//! Contains the catalog entry, its tag enums, the predicate set used to
//! filter listings, and the repository interface.

pub mod filter;
pub mod model;
pub mod repository;

pub use filter::{fold_case, GameFilter, GamePredicate, GameSort, SortDirection, SortKey, SortOrder};
pub use model::{AgeRating, Game, Genre, NewGame, Platform, UnknownTag};
pub use repository::GameRepository;
