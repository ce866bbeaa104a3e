use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Why an outbound call produced no payload.
///
/// Only visible inside the upstream client; callers see `None`.
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot decompress body: {0}")]
    Decompress(std::io::Error),

    #[error("cannot build header value: {0}")]
    InvalidHeader(String),
}

impl UpstreamError {
    /// Short label used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(e) if e.is_timeout() => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::Decompress(_) => "decompress",
            UpstreamError::InvalidHeader(_) => "invalid_header",
        }
    }
}

/// Outcome of a catalog lookup that produced nothing usable.
///
/// Every variant surfaces as `404` at the HTTP boundary, but the variants stay
/// distinct so logs can tell an unreachable upstream from an empty result.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("upstream service unavailable")]
    Unavailable,

    #[error("upstream rejected the request with code {code}")]
    Rejected { code: i64 },

    #[error("upstream response has an unexpected shape")]
    Malformed,

    #[error("no results for '{0}'")]
    NoResults(String),

    #[error("no stream resource available")]
    NoResource,
}

impl LookupError {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Unavailable => "unavailable",
            LookupError::Rejected { .. } => "rejected",
            LookupError::Malformed => "malformed",
            LookupError::NoResults(_) => "no_results",
            LookupError::NoResource => "no_resource",
        }
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        tracing::info!(kind = err.kind(), error = %err, "Catalog lookup came back empty");
        AppError::NotFound(err.to_string())
    }
}
