//! Database repository implementations

pub mod game_repository;

pub use game_repository::SeaOrmGameRepository;
