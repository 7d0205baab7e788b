//! URL matching over free text

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>\[\]{}()\\]+"#).expect("url pattern is valid")
});

static IMAGE_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg)").expect("extension pattern is valid")
});

const IMAGE_HINTS: &[&str] = &["image", "img", "cdn", "storage"];

/// Find a URL in text
///
/// Text that already starts with a scheme is returned whole (trimmed);
/// otherwise the first embedded URL wins.
#[must_use]
pub fn url_in_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    URL_PATTERN.find(trimmed).map(|m| m.as_str().to_string())
}

/// Every URL in text, in order of appearance
pub fn all_urls(text: &str) -> impl Iterator<Item = &str> {
    URL_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Heuristic: does this URL point at an image?
#[must_use]
pub fn looks_like_image(url: &str) -> bool {
    IMAGE_EXTENSION.is_match(url) || IMAGE_HINTS.iter().any(|hint| url.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_text_url() {
        assert_eq!(
            url_in_text("  https://cdn.example.com/a b.png "),
            Some("https://cdn.example.com/a b.png".to_string())
        );
    }

    #[test]
    fn embedded_url_stops_at_delimiters() {
        assert_eq!(
            url_in_text("see (https://x.io/p.png) now"),
            Some("https://x.io/p.png".to_string())
        );
        assert_eq!(
            url_in_text(r#"{"u":"http://x.io/q"}"#),
            Some("http://x.io/q".to_string())
        );
    }

    #[test]
    fn no_url() {
        assert_eq!(url_in_text(""), None);
        assert_eq!(url_in_text("   "), None);
        assert_eq!(url_in_text("httpbin is not a url"), None);
    }

    #[test]
    fn all_urls_in_order() {
        let urls: Vec<_> = all_urls("a http://one.io b https://two.io/x").collect();
        assert_eq!(urls, vec!["http://one.io", "https://two.io/x"]);
    }

    #[test]
    fn image_heuristic() {
        assert!(looks_like_image("https://x.io/a.JPG"));
        assert!(looks_like_image("https://cdn.x.io/abc"));
        assert!(looks_like_image("https://x.io/storage/abc"));
        assert!(!looks_like_image("https://x.io/docs/page"));
    }
}
