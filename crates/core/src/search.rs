//! Free-text search helpers for list endpoints.

/// Normalize a `?search=` parameter: trims, and treats blank as absent.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `%`, `_` and `\` in the user input are escaped so they match literally.
pub fn ilike_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_none() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(Some(" eng ")), Some("eng".to_string()));
    }

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(ilike_pattern("eng"), "%eng%");
    }

    #[test]
    fn pattern_escapes_metacharacters() {
        assert_eq!(ilike_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
