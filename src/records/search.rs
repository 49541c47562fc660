/// Fuzzy filtering of sort keys for the interactive picker.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

/// Return indices into `keys` matching `query`, best match first.
///
/// An empty query keeps every key in its original order. Ties keep the
/// original order as well, so `STATE` keys stay ahead of older versions.
#[must_use]
pub fn filter_keys(keys: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..keys.len()).collect();
    }

    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut scored: Vec<(usize, u32)> = keys
        .iter()
        .enumerate()
        .filter_map(|(idx, key)| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(key, &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (idx, score))
        })
        .collect();

    // Stable sort: equal scores keep list order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<String> {
        ["STATE", "STATE#2024-01-02", "v1", "v2"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        assert_eq!(filter_keys(&keys(), ""), vec![0, 1, 2, 3]);
    }

    #[test]
    fn query_narrows_results() {
        let hits = filter_keys(&keys(), "2024");
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn smart_case_matches_lowercase_query() {
        let hits = filter_keys(&keys(), "state");
        assert!(hits.contains(&0));
        assert!(hits.contains(&1));
        assert!(!hits.contains(&2));
    }

    #[test]
    fn no_match_yields_nothing() {
        assert!(filter_keys(&keys(), "zzz").is_empty());
    }
}
