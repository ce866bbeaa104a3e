/// Best-match selection for free-text queries
///
/// Scores each candidate title against the query and returns the strongest
/// one. When nothing scores, the first candidate in upstream order wins.
use crate::models::SearchResultItem;

/// Score for a title equal to the query
pub const EXACT_SCORE: u8 = 100;
/// Score for a title containing the query
pub const PARTIAL_SCORE: u8 = 80;

/// Anything that exposes a title to match against
pub trait Titled {
    fn title(&self) -> Option<&str>;
}

impl Titled for SearchResultItem {
    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}

/// Normalizes a query the same way titles are compared
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Scores one title against an already normalized query
pub fn score(normalized_query: &str, title: Option<&str>) -> u8 {
    let title = title.unwrap_or_default().to_lowercase();
    if normalized_query == title {
        EXACT_SCORE
    } else if title.contains(normalized_query) {
        PARTIAL_SCORE
    } else {
        0
    }
}

/// Picks the best candidate for `query`, or `None` when there are no candidates.
///
/// Ties keep their original order. If no candidate scores above zero the
/// first candidate of the input is returned, not the first of the ranking.
pub fn pick_best_match<'a, T: Titled>(query: &str, candidates: &'a [T]) -> Option<&'a T> {
    let first = candidates.first()?;
    let normalized = normalize_query(query);

    let mut ranked: Vec<(usize, u8)> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (index, score(&normalized, candidate.title())))
        .collect();
    // stable: equal scores stay in input order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    match ranked.first() {
        Some(&(index, top)) if top > 0 => {
            tracing::debug!(query = %query, index, score = top, "Best match selected");
            Some(&candidates[index])
        }
        _ => {
            tracing::debug!(query = %query, "No scoring match, falling back to first result");
            Some(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> SearchResultItem {
        SearchResultItem {
            title: title.to_string(),
            subject_id: format!("id-{}", title.len()),
            detail_path: title.to_lowercase().replace(' ', "-"),
            release_date: None,
            imdb_rating_value: None,
            genre: None,
            description: None,
        }
    }

    fn titles(names: &[&str]) -> Vec<SearchResultItem> {
        names.iter().map(|name| item(name)).collect()
    }

    fn index_of(candidates: &[SearchResultItem], picked: &SearchResultItem) -> usize {
        candidates
            .iter()
            .position(|c| std::ptr::eq(c, picked))
            .expect("picked candidate must come from the input")
    }

    #[test]
    fn test_exact_match_wins() {
        let candidates = titles(&["Matrix Reloaded", "The Matrix", "The Matrix Revisited"]);
        let picked = pick_best_match("The Matrix", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 1);
    }

    #[test]
    fn test_substring_match() {
        let candidates = titles(&["Unrelated", "The Matrix Trilogy"]);
        let picked = pick_best_match("Matrix", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 1);
    }

    #[test]
    fn test_no_match_falls_back_to_first() {
        let candidates = titles(&["A", "B"]);
        let picked = pick_best_match("Xyzzy", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 0);
    }

    #[test]
    fn test_empty_candidates() {
        let candidates: Vec<SearchResultItem> = Vec::new();
        assert!(pick_best_match("The Matrix", &candidates).is_none());
    }

    #[test]
    fn test_query_is_trimmed_and_case_folded() {
        let candidates = titles(&["The Matrix Trilogy", "THE MATRIX"]);
        let picked = pick_best_match("  the matrix \t", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 1);
    }

    #[test]
    fn test_exact_ties_keep_earliest() {
        let candidates = titles(&["Dune Part Two", "Dune", "dune"]);
        let picked = pick_best_match("Dune", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 1);
    }

    #[test]
    fn test_partial_ties_keep_earliest() {
        let candidates = titles(&["Nothing", "Alien: Romulus", "Aliens"]);
        let picked = pick_best_match("alien", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 1);
    }

    #[test]
    fn test_empty_title_does_not_match() {
        let candidates = titles(&["", "Heat"]);
        let picked = pick_best_match("Heat", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 1);
    }

    #[test]
    fn test_fallback_uses_input_order_not_ranking() {
        let candidates = titles(&["", "Heat"]);
        let picked = pick_best_match("Xyzzy", &candidates).unwrap();
        assert_eq!(index_of(&candidates, picked), 0);
    }

    #[test]
    fn test_score_values() {
        assert_eq!(score("heat", Some("Heat")), EXACT_SCORE);
        assert_eq!(score("heat", Some("Heat 2")), PARTIAL_SCORE);
        assert_eq!(score("heat", Some("Cold")), 0);
        assert_eq!(score("heat", None), 0);
    }
}
