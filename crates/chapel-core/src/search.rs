//! Forgiving text matching for the event search boxes.
//!
//! Both sides are lowercased and reduced to ASCII letters and digits before
//! comparison. A needle matches when it is a substring of the haystack or,
//! failing that, when its characters appear in the haystack in order. The
//! subsequence fallback is deliberately loose: `"crsmv"` matches
//! `"Christmas Event"`.

/// Lowercases `value` and drops everything outside `[a-z0-9]`.
pub fn normalize_for_search(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Returns `true` if every character of `needle` occurs in `haystack` in order.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut wanted = needle.chars().peekable();
    for ch in haystack.chars() {
        if wanted.peek() == Some(&ch) {
            wanted.next();
        }
        if wanted.peek().is_none() {
            return true;
        }
    }
    wanted.peek().is_none()
}

/// Matches a search box entry against a piece of text.
///
/// An empty needle matches everything; an empty haystack matches nothing
/// else.
pub fn fuzzy_match(needle: &str, haystack: &str) -> bool {
    let needle = normalize_for_search(needle);
    if needle.is_empty() {
        return true;
    }
    let haystack = normalize_for_search(haystack);
    if haystack.is_empty() {
        return false;
    }
    haystack.contains(&needle) || is_subsequence(&needle, &haystack)
}
