//! Database entities module

pub mod game;

pub use game::Entity as Game;
