//! Helpers for working with stored file URLs.

/// Extract the stored filename from a file-manager URL.
///
/// Strips any query string and returns the last path segment, so both
/// `https://files.example.com/dir/abc.png?token=x` and plain `abc.png`
/// yield `abc.png`.
pub fn extract_filename(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .unwrap_or(without_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_path_and_query() {
        assert_eq!(
            extract_filename("https://files.example.com/photos/abc-123.png?sig=deadbeef"),
            "abc-123.png"
        );
    }

    #[test]
    fn test_plain_filename_passes_through() {
        assert_eq!(extract_filename("abc.png"), "abc.png");
    }

    #[test]
    fn test_trailing_query_only() {
        assert_eq!(extract_filename("/dir/file.jpg"), "file.jpg");
    }
}
