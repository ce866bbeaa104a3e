use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod stream;
pub mod title;

pub use stream::{StreamLink, StreamingBundle, WatchLinks};
pub use title::SearchResultItem;

// ============================================================================
// Upstream envelope
// ============================================================================

/// Wrapper every upstream response is delivered in. `code == 0` means success.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// `data` payload of a search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Raw items; decoded one at a time so a single odd entry does not sink the page
    #[serde(default)]
    pub items: Vec<Value>,
}

impl SearchPage {
    /// Decode the items that carry the fields a stream lookup needs, in upstream order
    pub fn into_results(self) -> Vec<SearchResultItem> {
        self.items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<SearchResultItem>(item) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping undecodable search item");
                    None
                }
            })
            .collect()
    }
}

/// Composite response of the search-then-stream endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchedStreams {
    pub search_result: SearchResultItem,
    pub streaming_links: StreamingBundle,
}

// ============================================================================
// Lenient field decoding
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::UInt(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }

    fn into_float(self) -> Option<f64> {
        match self {
            TextOrNumber::Text(s) => s.trim().parse().ok(),
            TextOrNumber::Int(n) => Some(n as f64),
            TextOrNumber::UInt(n) => Some(n as f64),
            TextOrNumber::Float(n) => Some(n),
        }
    }
}

/// Accepts `"123"` or `123` and keeps the textual form
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}

pub(crate) fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer).map(|v| v.map(TextOrNumber::into_text))
}

/// Accepts `7.5`, `"7.5"` or `null`; unparseable text becomes `None`
pub(crate) fn optional_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer).map(|v| v.and_then(TextOrNumber::into_float))
}
