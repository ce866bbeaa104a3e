use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{StreamingBundle, WatchLinks},
    routes::AppState,
    services::{catalog, providers::moviebox, StreamTarget},
};

#[derive(Debug, Deserialize)]
pub struct StreamsQuery {
    subject_id: String,
    detail_path: String,
    title: String,
    #[serde(default)]
    season: u32,
    #[serde(default)]
    episode: u32,
}

/// Handler for direct stream lookup; season and episode default to movie mode
pub async fn streams(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<StreamsQuery>,
) -> AppResult<Json<StreamingBundle>> {
    tracing::info!(
        request_id = %request_id,
        subject_id = %params.subject_id,
        season = params.season,
        episode = params.episode,
        "Processing streams request"
    );

    let target = StreamTarget::movie(params.subject_id, params.detail_path, params.title)
        .episode(params.season, params.episode);
    let bundle = catalog::fetch_streams(state.catalog.as_ref(), &target).await?;
    Ok(Json(bundle))
}

#[derive(Debug, Deserialize)]
pub struct WatchLinksQuery {
    subject_id: String,
    detail_path: String,
    title: String,
}

/// Handler building browser links for a subject without calling upstream
pub async fn watch_links(
    State(state): State<AppState>,
    Query(params): Query<WatchLinksQuery>,
) -> Json<WatchLinks> {
    Json(moviebox::watch_links(
        &state.profile,
        &params.subject_id,
        &params.detail_path,
        &params.title,
    ))
}
