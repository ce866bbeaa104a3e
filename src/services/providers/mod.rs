/// Upstream catalog abstraction
///
/// A provider translates the two catalog operations (keyword search and
/// stream lookup) into outbound calls. Any failure comes back as `None`; the
/// provider logs the reason before discarding it.
use serde_json::Value;

pub mod moviebox;

pub use moviebox::MovieBoxClient;

pub const DEFAULT_PER_PAGE: u32 = 24;

/// Parameters of a keyword search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub keyword: String,
    pub page: u32,
    pub per_page: u32,
    /// Upstream content type filter, `0` for everything
    pub subject_type: u32,
}

impl SearchParams {
    /// First page of results for `keyword`, all content types
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            subject_type: 0,
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }
}

/// The subject (and episode) whose stream links are requested
///
/// Season and episode are both `0` for movies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTarget {
    pub subject_id: String,
    pub detail_path: String,
    pub title: String,
    pub season: u32,
    pub episode: u32,
}

impl StreamTarget {
    pub fn movie(
        subject_id: impl Into<String>,
        detail_path: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            detail_path: detail_path.into(),
            title: title.into(),
            season: 0,
            episode: 0,
        }
    }

    pub fn episode(mut self, season: u32, episode: u32) -> Self {
        self.season = season;
        self.episode = episode;
        self
    }
}

/// Trait for upstream catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog by keyword; `None` on any failure
    async fn search(&self, params: &SearchParams) -> Option<Value>;

    /// Fetch stream links for a subject/episode; `None` on any failure
    async fn get_streams(&self, target: &StreamTarget) -> Option<Value>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
