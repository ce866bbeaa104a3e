use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::SearchResultItem,
    routes::AppState,
    services::catalog::{self, SEARCH_PAGE_SIZE},
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: String,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<SearchResultItem>>> {
    catalog::validate_query(&params.query)?;
    tracing::info!(request_id = %request_id, query = %params.query, "Processing search request");

    let items = catalog::search_titles(state.catalog.as_ref(), &params.query, SEARCH_PAGE_SIZE).await?;
    Ok(Json(items))
}
