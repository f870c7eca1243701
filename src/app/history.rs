use crate::net::api::extract_term;

/// How many past searches are offered for revisiting.
pub const MAX_RECENT: usize = 5;

/// Derives the recent-search list from the full log of issued URLs.
///
/// The log is folded left to right into a deduplicated accumulator: a term
/// seen for the first time is appended; a term seen before is promoted to the
/// end, unless it already is the end (consecutive submits of the same term
/// collapse). The result is the last `MAX_RECENT` entries with the final one
/// dropped, since that final entry is the currently active search.
pub fn last_searches(urls: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for url in urls {
        let term = extract_term(url);
        match terms.iter().position(|t| t == term) {
            None => terms.push(term.to_string()),
            Some(seen) => {
                if terms.last().map(String::as_str) != Some(term) {
                    terms.remove(seen);
                    terms.push(term.to_string());
                }
            }
        }
    }

    let keep_from = terms.len().saturating_sub(MAX_RECENT + 1);
    let mut recent = terms.split_off(keep_from);
    recent.pop();
    recent
}
