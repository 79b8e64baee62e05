//! Catalog HTTP routes: games listing, health, metrics, docs and uploads

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, FieldError, QueryLimits};
use super::modules::games::{self, CatalogState, GameDto, GameListResponse};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use crate::application::CatalogService;
use crate::config::AppConfig;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        games::handlers::list_games,
        health::handlers::health_check,
    ),
    components(
        schemas(
            ApiResponse<String>,
            FieldError,
            GameDto,
            GameListResponse,
            HealthResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "Games", description = "Game catalog listing"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Game Store Catalog API",
        description = "Filtered, sorted and paginated game catalog",
    )
)]
pub struct ApiDoc;

/// Build the HTTP router.
///
/// Routes: `GET /games`, `GET /health`, `GET /metrics`, Swagger UI at
/// `/docs`, and static files under the configured uploads root.
pub fn create_api_router(
    catalog: Arc<CatalogService>,
    db: DatabaseConnection,
    prometheus_handle: PrometheusHandle,
    config: &AppConfig,
) -> Router {
    let catalog_state = CatalogState {
        catalog,
        limits: QueryLimits {
            max_per_page: config.pagination.max_per_page,
        },
    };

    let catalog_routes = Router::new()
        .route("/games", get(games::list_games))
        .with_state(catalog_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new(db));

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    info!(
        "Serving uploads from {} at {}",
        config.uploads.dir.display(),
        config.uploads.serve_root
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(catalog_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest_service(
            &config.uploads.serve_root,
            ServeDir::new(&config.uploads.dir),
        )
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use chrono::{TimeZone, Utc};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use sea_orm_migration::MigratorTrait;
    use tower::Service;

    use super::*;
    use crate::domain::{AgeRating, GameRepository, Genre, NewGame, Platform};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmGameRepository};

    fn new_game(
        title: &str,
        price: f64,
        year: i32,
        age_rating: AgeRating,
        genres: Vec<Genre>,
    ) -> NewGame {
        NewGame {
            title: title.into(),
            description: None,
            image: None,
            publisher: "Northwind Games".into(),
            developer: "Blue Harbor".into(),
            price,
            rating: 8.0,
            release_date: Utc.with_ymd_and_hms(year, 3, 1, 0, 0, 0).unwrap(),
            age_rating,
            genres,
            platforms: vec![Platform::PC, Platform::Xbox],
        }
    }

    async fn app_with(config: AppConfig) -> Router {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let repo = Arc::new(SeaOrmGameRepository::new(db.clone()));
        repo.insert_many(vec![
            new_game("Star Drift", 59.99, 2023, AgeRating::T, vec![Genre::Action, Genre::RPG]),
            new_game("Crypt Hollow", 19.99, 2019, AgeRating::M, vec![Genre::Horror]),
            new_game("Tiny Farm", 9.99, 2016, AgeRating::E, vec![Genre::Simulation]),
        ])
        .await
        .unwrap();

        let catalog = Arc::new(
            CatalogService::new(repo).with_default_per_page(config.pagination.default_per_page),
        );
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(catalog, db, handle, &config)
    }

    async fn app() -> Router {
        app_with(AppConfig::default()).await
    }

    async fn send(router: Router, uri: &str) -> Response<Body> {
        let mut svc = router.into_service();
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        svc.call(req).await.unwrap()
    }

    async fn json_body(resp: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn titles(body: &serde_json::Value) -> Vec<String> {
        body["games"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn lists_newest_first_by_default() {
        let resp = send(app().await, "/games").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["length"], 3);
        assert_eq!(titles(&body), vec!["Star Drift", "Crypt Hollow", "Tiny Farm"]);
        assert!(body["games"][0]["releaseDate"].is_string());
    }

    #[tokio::test]
    async fn length_ignores_the_page_window() {
        let resp = send(app().await, "/games?sort=LOW_PRICE&page=2&perPage=1").await;
        let body = json_body(resp).await;
        assert_eq!(body["length"], 3);
        assert_eq!(titles(&body), vec!["Crypt Hollow"]);
    }

    #[tokio::test]
    async fn adult_flag_false_hides_mature_titles() {
        let resp = send(app().await, "/games?isAdultOnly=false").await;
        let body = json_body(resp).await;
        assert_eq!(body["length"], 2);
        assert!(!titles(&body).contains(&"Crypt Hollow".to_string()));

        let resp = send(app().await, "/games?isAdultOnly=true").await;
        assert_eq!(json_body(resp).await["length"], 3);
    }

    #[tokio::test]
    async fn genre_filter_requires_every_genre() {
        let resp = send(app().await, "/games?genres=RPG%7CAction").await;
        let body = json_body(resp).await;
        assert_eq!(titles(&body), vec!["Star Drift"]);

        let resp = send(app().await, "/games?genres=RPG%7CHorror").await;
        assert_eq!(json_body(resp).await["length"], 0);
    }

    #[tokio::test]
    async fn invalid_parameters_return_422_with_fields() {
        let resp = send(app().await, "/games?sort=CHEAP&perPage=0").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn configured_page_size_cap_is_enforced() {
        let mut config = AppConfig::default();
        config.pagination.max_per_page = Some(2);
        let resp = send(app_with(config).await, "/games?perPage=3").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn page_window_beyond_signed_range() {
        let resp = send(app().await, "/games?perPage=18446744073709551615").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(resp).await;
        assert_eq!(body["data"][0]["field"], "perPage");

        let resp = send(app().await, "/games?page=9223372036854775807&perPage=10").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["length"], 3);
        assert!(titles(&body).is_empty());
    }

    #[tokio::test]
    async fn health_reports_database_ok() {
        let resp = send(app().await, "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let mut svc = app().await.into_service();
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "abc-123");

        let resp = send(app().await, "/games").await;
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn serves_uploaded_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cover.txt"), "cover").unwrap();

        let mut config = AppConfig::default();
        config.uploads.dir = dir.path().to_path_buf();

        let resp = send(app_with(config).await, "/uploads/cover.txt").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"cover");
    }

    #[tokio::test]
    async fn openapi_document_lists_games_path() {
        let resp = send(app().await, "/api-doc/openapi.json").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert!(body["paths"]["/games"].is_object());
    }
}
