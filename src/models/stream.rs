use serde::{Deserialize, Serialize};

/// A single playable link
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamLink {
    #[serde(default, deserialize_with = "super::optional_text_or_number")]
    pub format: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Resolution label, e.g. `"1080"`
    #[serde(default, deserialize_with = "super::optional_text_or_number")]
    pub resolutions: Option<String>,
    #[serde(default, deserialize_with = "super::optional_text_or_number")]
    pub size: Option<String>,
}

/// Stream links for one subject/episode, split into direct files and HLS playlists
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamingBundle {
    #[serde(default)]
    pub streams: Vec<StreamLink>,
    #[serde(default)]
    pub hls: Vec<StreamLink>,
    #[serde(default)]
    pub has_resource: bool,
}

/// Links a browser can open directly for a subject
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchLinks {
    pub fmovies: String,
    pub moviebox: String,
    pub streaming_api: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundle_deserialization() {
        let bundle: StreamingBundle = serde_json::from_value(json!({
            "streams": [{
                "format": "MP4",
                "id": "5473528931341285232",
                "url": "https://cdn.example/matrix-1080.mp4",
                "resolutions": 1080,
                "size": "2147483648",
                "duration": 8160
            }],
            "hls": [],
            "hasResource": true
        }))
        .unwrap();

        assert!(bundle.has_resource);
        assert_eq!(bundle.streams.len(), 1);
        assert_eq!(bundle.streams[0].resolutions.as_deref(), Some("1080"));
        assert_eq!(bundle.streams[0].size.as_deref(), Some("2147483648"));
    }

    #[test]
    fn test_bundle_missing_flag_means_no_resource() {
        let bundle: StreamingBundle = serde_json::from_value(json!({ "streams": [] })).unwrap();
        assert!(!bundle.has_resource);
        assert!(bundle.hls.is_empty());
    }
}
