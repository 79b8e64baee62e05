//! Game catalog listing API

pub mod dto;
pub mod handlers;

pub use dto::{GameDto, GameListResponse, RawGameListQuery};
pub use handlers::{list_games, CatalogState};
