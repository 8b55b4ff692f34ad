//! Case-insensitive substring search.

/// Returns `true` if `query` occurs in `haystack`, ignoring case.
///
/// An empty query matches everything.
pub fn contains_ignore_case(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Returns `true` if `query` occurs in any of `fields`, ignoring case.
pub fn matches_any(fields: &[&str], query: &str) -> bool {
    fields.iter().any(|field| contains_ignore_case(field, query))
}

/// Build an `ILIKE` pattern that matches `query` as a literal substring.
///
/// `\`, `%` and `_` in the query are escaped so user input cannot inject
/// wildcards.
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
