//! HTML escaping and URL scheme checks.

/// Schemes accepted by [`UrlPolicy::Strict`](crate::UrlPolicy::Strict).
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Escape text for use in HTML content or a quoted attribute value.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Whether `url` is relative, a fragment, or uses a safe scheme.
///
/// Browsers ignore ASCII whitespace and control characters inside a scheme
/// (`java\tscript:`), so those are removed before the scheme is read.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    // A scheme ends at the first ':' that comes before any '/', '?' or '#'.
    let scheme_end = cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(idx) if cleaned[idx..].starts_with(':') => {
            let scheme = cleaned[..idx].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

/// Whether `url` can sit inside an unquoted CSS `url(...)` token.
pub fn is_css_url_safe(url: &str) -> bool {
    !url.chars()
        .any(|c| matches!(c, '(' | ')' | '\'' | '"' | ';' | '\\') || c.is_whitespace())
}
