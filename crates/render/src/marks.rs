//! Inline mark application for text nodes.

use crate::config::UrlPolicy;
use crate::document::Mark;
use crate::escape::html_escape;

/// Wrap already-escaped `text` in the tags for `marks`.
///
/// Marks are applied last-to-first: the last stored mark becomes the
/// innermost wrapper and the first stored mark the outermost. Stored
/// content depends on this order, so `[bold, italic]` must render as
/// `<strong><em>text</em></strong>`.
pub fn apply_marks(escaped: String, marks: &[Mark], policy: UrlPolicy) -> String {
    marks
        .iter()
        .rev()
        .fold(escaped, |inner, mark| apply_mark(mark, inner, policy))
}

fn apply_mark(mark: &Mark, inner: String, policy: UrlPolicy) -> String {
    match mark.mark_type.as_str() {
        "bold" => format!("<strong>{inner}</strong>"),
        "italic" => format!("<em>{inner}</em>"),
        "strike" => format!("<s>{inner}</s>"),
        "link" => {
            let href = mark
                .attrs()
                .str("href")
                .and_then(|href| policy.accept(href))
                .unwrap_or("#");
            format!("<a href=\"{}\">{inner}</a>", html_escape(href))
        }
        _ => inner,
    }
}
