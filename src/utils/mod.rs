//! Utility functions and helpers.

pub mod http;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{AppError, Result};

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve `href` against `base` unless it is already absolute.
///
/// Absolute links are returned verbatim so the recorded link matches the page.
pub fn resolve_href(base: &Url, href: &str) -> String {
    if Url::parse(href.trim()).is_ok() {
        href.to_string()
    } else {
        resolve_url(base, href)
    }
}

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collapse whitespace runs (including newlines) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text content of an element with whitespace normalized.
pub fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
    }

    #[test]
    fn test_resolve_href_keeps_absolute_verbatim() {
        let base = Url::parse("https://example.com/ofertas/page/1/").unwrap();
        // Url::join would append a trailing slash to the bare host.
        assert_eq!(
            resolve_href(&base, "https://other.com"),
            "https://other.com"
        );
        assert_eq!(
            resolve_href(&base, "/oferta/12"),
            "https://example.com/oferta/12"
        );
    }

    #[test]
    fn test_resolve_href_does_not_trim_absolute() {
        let base = Url::parse("https://example.com/ofertas/page/1/").unwrap();
        assert_eq!(
            resolve_href(&base, " https://example.com/oferta/12 "),
            " https://example.com/oferta/12 "
        );
    }

    #[test]
    fn test_parse_selector() {
        assert!(parse_selector("div#tareas").is_ok());
        assert!(parse_selector("ul.pagination li a").is_ok());
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  Lunes a viernes\n\t 9:00 -  14:00 "),
            "Lunes a viernes 9:00 - 14:00"
        );
        assert_eq!(normalize_whitespace(" \n "), "");
    }
}
