use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::UpstreamProfile,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::CatalogProvider,
};

pub mod combined;
pub mod streams;
pub mod titles;

/// Shared application state
///
/// Built once in `main` and handed to the router; handlers never reach for a global client.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub profile: Arc<UpstreamProfile>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>, profile: UpstreamProfile) -> Self {
        Self {
            catalog,
            profile: Arc::new(profile),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/search", get(titles::search))
        .route("/streams", get(streams::streams))
        .route("/watch-links", get(streams::watch_links))
        .route("/search-and-get-streams", get(combined::search_and_get_streams))
        .route(
            "/search-and-get-episode-streams",
            get(combined::search_and_get_episode_streams),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// Welcome endpoint
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the MovieBox API. Use /search, /streams or /search-and-get-streams."
    }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
