use serde::{Deserialize, Serialize};

/// One catalog entry returned by the upstream search
///
/// `subject_id` and `detail_path` are opaque upstream tokens. They are carried
/// verbatim into stream lookups and never parsed or normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub title: String,
    #[serde(deserialize_with = "super::text_or_number")]
    pub subject_id: String,
    pub detail_path: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "super::optional_float")]
    pub imdb_rating_value: Option<f64>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_deserialization() {
        let item: SearchResultItem = serde_json::from_value(json!({
            "subjectId": "8906247916759695608",
            "subjectType": 1,
            "title": "The Matrix",
            "description": "A hacker learns the truth.",
            "releaseDate": "1999-03-31",
            "genre": "Action,Sci-Fi",
            "imdbRatingValue": "8.7",
            "detailPath": "the-matrix-Ir3NMdzj8V2"
        }))
        .unwrap();

        assert_eq!(item.title, "The Matrix");
        assert_eq!(item.subject_id, "8906247916759695608");
        assert_eq!(item.detail_path, "the-matrix-Ir3NMdzj8V2");
        assert_eq!(item.release_date.as_deref(), Some("1999-03-31"));
        assert_eq!(item.imdb_rating_value, Some(8.7));
        assert_eq!(item.genre.as_deref(), Some("Action,Sci-Fi"));
    }

    #[test]
    fn test_numeric_subject_id_beyond_i64_is_kept_exact() {
        let item: SearchResultItem = serde_json::from_str(
            r#"{"title":"X","subjectId":18446744073709551557,"detailPath":"x"}"#,
        )
        .unwrap();
        assert_eq!(item.subject_id, "18446744073709551557");

        let item: SearchResultItem = serde_json::from_str(
            r#"{"title":"Y","subjectId":8906247916759695608,"detailPath":"y"}"#,
        )
        .unwrap();
        assert_eq!(item.subject_id, "8906247916759695608");
    }

    #[test]
    fn test_rating_accepts_number_and_garbage() {
        let numeric: SearchResultItem = serde_json::from_value(json!({
            "title": "A", "subjectId": "1", "detailPath": "a", "imdbRatingValue": 6.1
        }))
        .unwrap();
        assert_eq!(numeric.imdb_rating_value, Some(6.1));

        let garbage: SearchResultItem = serde_json::from_value(json!({
            "title": "B", "subjectId": "2", "detailPath": "b", "imdbRatingValue": "n/a"
        }))
        .unwrap();
        assert_eq!(garbage.imdb_rating_value, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let item = SearchResultItem {
            title: "The Matrix".to_string(),
            subject_id: "42".to_string(),
            detail_path: "the-matrix-xyz".to_string(),
            release_date: None,
            imdb_rating_value: None,
            genre: None,
            description: None,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["subjectId"], "42");
        assert_eq!(value["detailPath"], "the-matrix-xyz");
        assert!(value["imdbRatingValue"].is_null());
    }
}
