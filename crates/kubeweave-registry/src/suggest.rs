//! Fuzzy matching for kind lookup failures
//!
//! Uses Levenshtein distance to offer close registered names when a source
//! file references a kind the registry does not know.

/// Maximum Levenshtein distance to consider for suggestions
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Find the closest registered names to `input`, best matches first.
///
/// Exact matches are excluded (the caller already knows the name missed)
/// and candidates further than [`MAX_SUGGESTION_DISTANCE`] edits away are
/// dropped to avoid nonsense suggestions.
pub fn find_closest(input: &str, candidates: &[&str], max_results: usize) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = strsim::levenshtein(input, candidate);
            if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE {
                Some((distance, candidate))
            } else {
                None
            }
        })
        .collect();

    // Sort by distance (best matches first), then alphabetically for
    // deterministic output
    scored.sort();
    scored.dedup_by_key(|(_, text)| *text);
    scored
        .into_iter()
        .take(max_results)
        .map(|(_, text)| text.to_string())
        .collect()
}
