//! Text normalization shared by every strategy.
//!
//! Lengths are counted in characters, not bytes, and every cut lands on a
//! character boundary.

use std::sync::LazyLock;

use regex::Regex;

use crate::page::Page;

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Collapse every whitespace run (newlines included) to one space and trim.
///
/// Blank-line sequences disappear with the rest of the whitespace.
/// `clean(clean(x)) == clean(x)` for every `x`.
///
/// ```rust
/// use page_context::text::clean;
///
/// assert_eq!(clean("  Hello\n\n\t world  "), "Hello world");
/// ```
#[must_use]
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Cut `text` to at most `max_len` characters, preferring a sentence end.
///
/// Text that already fits is returned unchanged. Otherwise the text is cut
/// at `max_len`; if the last `.` in that window sits in its final 20%, the
/// cut moves back to just after the period.
///
/// ```rust
/// use page_context::text::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("abcdefghij.xyz", 12), "abcdefghij.");
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_len) else {
        return text.to_string();
    };
    let window = &text[..cut];

    if let Some(period) = window.rfind('.') {
        let period_chars = window[..period].chars().count();
        if period_chars as f64 > max_len as f64 * 0.8 {
            return window[..=period].to_string();
        }
    }

    window.to_string()
}

/// The page's current selection, trimmed, or `""` when there is none or
/// the host refuses access.
pub fn selected_text(page: &dyn Page) -> String {
    match page.selected_text() {
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read selected text");
            String::new()
        }
    }
}

/// Character length, the unit every threshold and cap is expressed in.
#[inline]
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
