//! Game catalog API handlers

use std::sync::Arc;

use axum::{extract::FromRef, extract::State, http::StatusCode, Json};
use tracing::error;

use super::dto::{GameListResponse, RawGameListQuery};
use crate::application::CatalogService;
use crate::interfaces::http::common::{ApiResponse, FieldError, QueryLimits, ValidatedQuery};

#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<CatalogService>,
    pub limits: QueryLimits,
}

impl FromRef<CatalogState> for QueryLimits {
    fn from_ref(s: &CatalogState) -> Self {
        s.limits
    }
}

#[utoipa::path(
    get,
    path = "/games",
    tag = "Games",
    params(RawGameListQuery),
    responses(
        (status = 200, description = "Page of matching games and the total match count", body = GameListResponse),
        (status = 400, description = "Undecodable query string", body = ApiResponse<String>),
        (status = 422, description = "Invalid query parameters", body = ApiResponse<Vec<FieldError>>),
        (status = 500, description = "Storage failure", body = ApiResponse<String>)
    )
)]
pub async fn list_games(
    State(state): State<CatalogState>,
    ValidatedQuery(query): ValidatedQuery<RawGameListQuery>,
) -> Result<Json<GameListResponse>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.catalog.list_games(&query).await {
        Ok(page) => Ok(Json(GameListResponse::from(page))),
        Err(e) => {
            error!("Failed to list games: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            ))
        }
    }
}
