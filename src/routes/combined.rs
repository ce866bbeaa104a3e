use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::MatchedStreams,
    routes::AppState,
    services::catalog,
};

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    query: String,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeQuery {
    query: String,
    season: u32,
    episode: u32,
}

/// Searches for a title and returns the streams of its best match, movie mode
pub async fn search_and_get_streams(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<MovieQuery>,
) -> AppResult<Json<MatchedStreams>> {
    catalog::validate_query(&params.query)?;
    tracing::info!(request_id = %request_id, query = %params.query, "Resolving movie streams");

    let matched = catalog::find_streams(state.catalog.as_ref(), &params.query, 0, 0).await?;
    Ok(Json(matched))
}

/// Same as [`search_and_get_streams`] for one episode of a series
pub async fn search_and_get_episode_streams(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<EpisodeQuery>,
) -> AppResult<Json<MatchedStreams>> {
    catalog::validate_query(&params.query)?;
    if params.season == 0 || params.episode == 0 {
        return Err(AppError::InvalidInput(
            "season and episode must be greater than 0".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        query = %params.query,
        season = params.season,
        episode = params.episode,
        "Resolving episode streams"
    );

    let matched = catalog::find_streams(
        state.catalog.as_ref(),
        &params.query,
        params.season,
        params.episode,
    )
    .await?;
    Ok(Json(matched))
}
