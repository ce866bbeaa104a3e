/// MovieBox catalog provider
///
/// Search and stream lookups live on two different hosts, each of which only
/// answers requests that look like they come from its own web player.
///
/// API Flow:
/// 1. Search: POST /wefeed-h5-bff/web/subject/search → items with subjectId + detailPath
/// 2. Streams: GET /wefeed-h5-bff/web/subject/play?subjectId=&se=&ep= → stream links
///
/// Headers are rebuilt from the immutable profile on every call, so one client
/// can serve concurrent requests without sharing a mutable referer.
use std::{io::Read, sync::Arc};

use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client as HttpClient, Response, StatusCode,
};
use serde_json::{json, Value};

use crate::{
    config::UpstreamProfile,
    error::UpstreamError,
    models::WatchLinks,
    services::providers::{CatalogProvider, SearchParams, StreamTarget},
};

const API_PREFIX: &str = "/wefeed-h5-bff/web/subject";
const SEARCH_UTM_SOURCE: &str = "h5seo_www.google.com";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.6";
/// Encodings `decompress` can undo
const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Browser client hints the search host expects alongside the user agent
const CLIENT_HINTS: [(&str, &str); 7] = [
    (
        "sec-ch-ua",
        "\"Not;A=Brand\";v=\"99\", \"Brave\";v=\"139\", \"Chromium\";v=\"139\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    ("sec-gpc", "1"),
];

#[derive(Clone)]
pub struct MovieBoxClient {
    http_client: HttpClient,
    profile: Arc<UpstreamProfile>,
}

impl MovieBoxClient {
    /// Creates a client; bodies are handed over raw and decoded in `read_json`
    pub fn new(profile: UpstreamProfile) -> Result<Self, UpstreamError> {
        let http_client = HttpClient::builder().no_gzip().no_brotli().no_deflate().build()?;

        Ok(Self {
            http_client,
            profile: Arc::new(profile),
        })
    }

    fn search_url(&self) -> String {
        format!("{}{}/search", self.profile.search_base_url, API_PREFIX)
    }

    fn play_url(&self) -> String {
        format!("{}{}/play", self.profile.stream_base_url, API_PREFIX)
    }

    fn client_info(&self) -> String {
        json!({ "timezone": self.profile.client_timezone }).to_string()
    }

    /// Full header set for one search call
    fn search_headers(&self, keyword: &str) -> Result<HeaderMap, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            header::COOKIE,
            header_value(&format!("i18n_lang=en; account={}", self.profile.account_cookie))?,
        );
        headers.insert(header::ORIGIN, header_value(&self.profile.search_base_url)?);
        for (name, value) in CLIENT_HINTS {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        headers.insert(header::USER_AGENT, header_value(&self.profile.user_agent)?);
        headers.insert(
            HeaderName::from_static("x-client-info"),
            header_value(&self.client_info())?,
        );
        headers.insert(header::REFERER, header_value(&search_referer(&self.profile, keyword))?);
        Ok(headers)
    }

    /// Header set for one stream call
    fn stream_headers(&self, target: &StreamTarget) -> Result<HeaderMap, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, header_value(&self.profile.user_agent)?);
        headers.insert(
            header::REFERER,
            header_value(&player_page(
                &self.profile,
                &target.subject_id,
                &target.detail_path,
            ))?,
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::ORIGIN, header_value(&self.profile.stream_base_url)?);
        headers.insert(
            HeaderName::from_static("x-client-info"),
            header_value(&self.client_info())?,
        );
        Ok(headers)
    }

    /// Search call with the failure reason preserved
    pub async fn try_search(&self, params: &SearchParams) -> Result<Value, UpstreamError> {
        let payload = json!({
            "keyword": params.keyword,
            "page": params.page,
            "perPage": params.per_page,
            "subjectType": params.subject_type,
        });

        let response = self
            .http_client
            .post(self.search_url())
            .headers(self.search_headers(&params.keyword)?)
            .json(&payload)
            .timeout(self.profile.search_timeout)
            .send()
            .await?;

        read_json(response).await
    }

    /// Stream call with the failure reason preserved
    pub async fn try_get_streams(&self, target: &StreamTarget) -> Result<Value, UpstreamError> {
        let response = self
            .http_client
            .get(self.play_url())
            .headers(self.stream_headers(target)?)
            .query(&[
                ("subjectId", target.subject_id.clone()),
                ("se", target.season.to_string()),
                ("ep", target.episode.to_string()),
            ])
            .timeout(self.profile.stream_timeout)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Referer of the search results page for `keyword`
pub fn search_referer(profile: &UpstreamProfile, keyword: &str) -> String {
    format!(
        "{}/web/searchResult?keyword={}&utm_source={}",
        profile.search_base_url,
        urlencoding::encode(keyword),
        SEARCH_UTM_SOURCE
    )
}

/// Player page of a subject; ids are inserted verbatim
pub fn player_page(profile: &UpstreamProfile, subject_id: &str, detail_path: &str) -> String {
    format!(
        "{}/spa/videoPlayPage/movies/{}?id={}&type=/movie/detail",
        profile.stream_base_url, detail_path, subject_id
    )
}

/// Browser-facing links for a subject, movie mode
pub fn watch_links(
    profile: &UpstreamProfile,
    subject_id: &str,
    detail_path: &str,
    title: &str,
) -> WatchLinks {
    WatchLinks {
        fmovies: player_page(profile, subject_id, detail_path),
        moviebox: format!("{}/web/detail/{}", profile.search_base_url, detail_path),
        streaming_api: format!(
            "{}{}/play?subjectId={}&se=0&ep=0",
            profile.stream_base_url, API_PREFIX, subject_id
        ),
        title: title.to_string(),
    }
}

fn header_value(value: &str) -> Result<HeaderValue, UpstreamError> {
    HeaderValue::from_str(value).map_err(|_| UpstreamError::InvalidHeader(value.to_string()))
}

/// Undoes one layer of `content-encoding`; `None` for encodings we do not handle
fn decompress(encoding: &str, body: &[u8]) -> Option<std::io::Result<Vec<u8>>> {
    let encoding = encoding.to_ascii_lowercase();
    let mut decoded = Vec::new();
    let result = if encoding.contains("br") {
        brotli::Decompressor::new(body, 4096).read_to_end(&mut decoded)
    } else if encoding.contains("gzip") {
        flate2::read::GzDecoder::new(body).read_to_end(&mut decoded)
    } else if encoding.contains("deflate") {
        flate2::read::ZlibDecoder::new(body).read_to_end(&mut decoded)
    } else {
        return None;
    };
    Some(result.map(|_| decoded))
}

/// Parses the raw body; if that fails and the body is labelled compressed,
/// decompresses once and parses again
fn decode_body(content_encoding: Option<&str>, body: &[u8]) -> Result<Value, UpstreamError> {
    let err = match serde_json::from_slice(body) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(encoding) = content_encoding else {
        tracing::debug!(error = %err, body_len = body.len(), "Upstream body is not JSON");
        return Err(UpstreamError::Decode(err));
    };

    match decompress(encoding, body) {
        Some(Ok(decoded)) => serde_json::from_slice(&decoded).map_err(|e| {
            tracing::debug!(
                error = %e,
                content_encoding = %encoding,
                decoded_len = decoded.len(),
                "Decompressed upstream body is not JSON"
            );
            UpstreamError::Decode(e)
        }),
        Some(Err(e)) => Err(UpstreamError::Decompress(e)),
        None => {
            tracing::debug!(
                error = %err,
                content_encoding = %encoding,
                "Upstream body is not JSON and its encoding is unsupported"
            );
            Err(UpstreamError::Decode(err))
        }
    }
}

/// Accepts only `200 OK` with a JSON body
async fn read_json(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(UpstreamError::Status(status));
    }

    let content_encoding = response
        .headers()
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;

    decode_body(content_encoding.as_deref(), &body)
}

#[async_trait::async_trait]
impl CatalogProvider for MovieBoxClient {
    async fn search(&self, params: &SearchParams) -> Option<Value> {
        match self.try_search(params).await {
            Ok(value) => {
                tracing::info!(
                    keyword = %params.keyword,
                    page = params.page,
                    per_page = params.per_page,
                    provider = self.name(),
                    "Search completed"
                );
                Some(value)
            }
            Err(e) => {
                tracing::warn!(
                    keyword = %params.keyword,
                    kind = e.kind(),
                    error = %e,
                    provider = self.name(),
                    "Search failed"
                );
                None
            }
        }
    }

    async fn get_streams(&self, target: &StreamTarget) -> Option<Value> {
        match self.try_get_streams(target).await {
            Ok(value) => {
                tracing::info!(
                    subject_id = %target.subject_id,
                    season = target.season,
                    episode = target.episode,
                    provider = self.name(),
                    "Streams fetched"
                );
                Some(value)
            }
            Err(e) => {
                tracing::warn!(
                    subject_id = %target.subject_id,
                    title = %target.title,
                    kind = e.kind(),
                    error = %e,
                    provider = self.name(),
                    "Stream lookup failed"
                );
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "moviebox"
    }
}
