//! Upgrading catalogue links to the secure scheme.

const INSECURE_PREFIX: &str = "http://";
const SECURE_PREFIX: &str = "https://";

/// Rewrites an `http://` URL to `https://`; other URLs are returned unchanged.
pub fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix(INSECURE_PREFIX) {
        Some(rest) => format!("{}{}", SECURE_PREFIX, rest),
        None => url.to_string(),
    }
}

/// Same as [`upgrade_to_https`] for optional links, dropping blank values.
pub fn upgrade_optional(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(upgrade_to_https)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_plain_http() {
        assert_eq!(
            upgrade_to_https("http://books.google.com/books/content?id=1&zoom=1"),
            "https://books.google.com/books/content?id=1&zoom=1"
        );
    }

    #[test]
    fn keeps_https_untouched() {
        assert_eq!(upgrade_to_https("https://example.com/a.png"), "https://example.com/a.png");
    }

    #[test]
    fn only_rewrites_the_scheme_prefix() {
        assert_eq!(
            upgrade_to_https("https://example.com/?next=http://x"),
            "https://example.com/?next=http://x"
        );
    }

    #[test]
    fn optional_drops_blank_links() {
        assert_eq!(upgrade_optional(None), None);
        assert_eq!(upgrade_optional(Some("  ")), None);
        assert_eq!(
            upgrade_optional(Some("http://a/b")),
            Some("https://a/b".to_string())
        );
    }
}
