//! Small string helpers shared by the scrapers and the fetcher.
//!
//! - URL completion for relative links found in scraped markup
//! - String truncation for logging response bodies

/// Resolve a scraped `href` against a site's base URL.
///
/// This is deliberately simpler than RFC 3986 resolution; it mirrors how the
/// scraped sites link to their own articles.
///
/// - An empty `href` yields an empty string, meaning "no link".
/// - An `href` starting with `http` is already absolute and returned as-is.
/// - Otherwise any trailing slashes are stripped from `base_url` and the two
///   are joined with exactly one `/`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(complete_url("http://example.com", "/path"), "http://example.com/path");
/// assert_eq!(complete_url("http://example.com/", "path"), "http://example.com/path");
/// ```
pub fn complete_url(base_url: &str, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("http") {
        return href.to_string();
    }

    let base_url = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base_url}{href}")
    } else {
        format!("{base_url}/{href}")
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes, backing off to the nearest
/// character boundary, with an ellipsis and the count of dropped bytes
/// appended. Bengali headlines are multi-byte, so slicing at an arbitrary
/// byte offset would panic.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_url_leading_slash() {
        assert_eq!(
            complete_url("http://example.com", "/path"),
            "http://example.com/path"
        );
    }

    #[test]
    fn test_complete_url_trailing_slash_base() {
        assert_eq!(
            complete_url("http://example.com/", "path"),
            "http://example.com/path"
        );
    }

    #[test]
    fn test_complete_url_absolute_href() {
        assert_eq!(
            complete_url("http://example.com", "http://other.com"),
            "http://other.com"
        );
        assert_eq!(
            complete_url("http://example.com", "https://other.com/a"),
            "https://other.com/a"
        );
    }

    #[test]
    fn test_complete_url_empty_href() {
        assert_eq!(complete_url("http://example.com", ""), "");
    }

    #[test]
    fn test_complete_url_double_slash_join() {
        assert_eq!(
            complete_url("https://mzamin.com/", "/article/1"),
            "https://mzamin.com/article/1"
        );
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        // Each Bengali letter here is three bytes.
        let s = "খবরখবর";
        let result = truncate_for_log(s, 4);
        assert!(result.starts_with("খ…"));
        assert!(result.ends_with("(+15 bytes)"));
    }
}
