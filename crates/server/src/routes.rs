use std::sync::Arc;

use axum::{
    http::Uri,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::{movie::MovieService, storage::MovieStore};

use crate::errors::JsonApiError;
use crate::openapi::HealthResponse;
use crate::{metrics, openapi};

pub mod movies;

/// Shared handler state. Cloned per request; the store lives behind the `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub movies: Arc<MovieService<MovieStore>>,
}

impl ServerState {
    pub fn new(store: Arc<MovieStore>) -> Self {
        Self { movies: Arc::new(MovieService::new(store)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn fallback(uri: Uri) -> JsonApiError {
    JsonApiError::not_found(format!("no route for {}", uri.path()))
}

/// Build the full application router: movie resource, health, metrics and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Movie resource; the route layer sees the matched path for metrics labels
    let movie_routes = Router::new()
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route("/movies/search", get(movies::search_movies))
        .route(
            "/movies/:id",
            get(movies::get_movie).put(movies::update_movie).delete(movies::delete_movie),
        )
        .route_layer(middleware::from_fn(metrics::track));

    // Operational routes
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    // Compose
    ops.merge(movie_routes)
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx are logged at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
