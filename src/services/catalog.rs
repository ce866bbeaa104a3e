/// Catalog lookups used by the HTTP handlers
///
/// Unwraps the upstream envelope, applies the documented success rules and
/// reports why a lookup produced nothing through `LookupError`.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult, LookupError},
    models::{Envelope, MatchedStreams, SearchPage, SearchResultItem, StreamingBundle},
    services::{
        matcher::pick_best_match,
        providers::{CatalogProvider, SearchParams, StreamTarget},
    },
};

/// Page size for plain searches
pub const SEARCH_PAGE_SIZE: u32 = 20;
/// Page size when searching only to pick a best match
pub const MATCH_PAGE_SIZE: u32 = 10;
pub const MIN_QUERY_LEN: usize = 2;

/// Rejects queries too short to be worth an upstream call
pub fn validate_query(query: &str) -> AppResult<()> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Err(AppError::InvalidInput(format!(
            "query must be at least {} characters",
            MIN_QUERY_LEN
        )));
    }
    Ok(())
}

/// Decodes an upstream envelope and returns its `data` when `code == 0`
fn unwrap_envelope<T: DeserializeOwned>(raw: Value) -> Result<T, LookupError> {
    let envelope: Envelope<T> = serde_json::from_value(raw).map_err(|e| {
        tracing::debug!(error = %e, "Upstream envelope did not decode");
        LookupError::Malformed
    })?;

    if !envelope.is_success() {
        tracing::debug!(
            code = envelope.code,
            message = ?envelope.message,
            "Upstream reported failure"
        );
        return Err(LookupError::Rejected {
            code: envelope.code,
        });
    }

    envelope.data.ok_or(LookupError::Malformed)
}

/// Searches the catalog and returns the decodable items in upstream order
pub async fn search_titles(
    provider: &dyn CatalogProvider,
    query: &str,
    per_page: u32,
) -> Result<Vec<SearchResultItem>, LookupError> {
    let raw = provider
        .search(&SearchParams::new(query).per_page(per_page))
        .await
        .ok_or(LookupError::Unavailable)?;

    let items = unwrap_envelope::<SearchPage>(raw)?.into_results();
    if items.is_empty() {
        return Err(LookupError::NoResults(query.to_string()));
    }

    tracing::info!(query = %query, results = items.len(), "Title search completed");
    Ok(items)
}

/// Fetches stream links for one subject/episode
pub async fn fetch_streams(
    provider: &dyn CatalogProvider,
    target: &StreamTarget,
) -> Result<StreamingBundle, LookupError> {
    let raw = provider
        .get_streams(target)
        .await
        .ok_or(LookupError::Unavailable)?;

    let bundle: StreamingBundle = unwrap_envelope(raw)?;
    if !bundle.has_resource {
        return Err(LookupError::NoResource);
    }

    tracing::info!(
        subject_id = %target.subject_id,
        streams = bundle.streams.len(),
        hls = bundle.hls.len(),
        "Stream links resolved"
    );
    Ok(bundle)
}

/// Searches for `query`, picks the best match and fetches its streams.
///
/// Season and episode are `0` for movies.
pub async fn find_streams(
    provider: &dyn CatalogProvider,
    query: &str,
    season: u32,
    episode: u32,
) -> Result<MatchedStreams, LookupError> {
    let items = search_titles(provider, query, MATCH_PAGE_SIZE).await?;
    let best = pick_best_match(query, &items)
        .cloned()
        .ok_or_else(|| LookupError::NoResults(query.to_string()))?;

    let target = StreamTarget::movie(
        best.subject_id.clone(),
        best.detail_path.clone(),
        best.title.clone(),
    )
    .episode(season, episode);
    let streaming_links = fetch_streams(provider, &target).await?;

    Ok(MatchedStreams {
        search_result: best,
        streaming_links,
    })
}
