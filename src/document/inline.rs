//! Inline emphasis scanning.
//!
//! The agent is prompted to emit `**bold**` (or the `__bold__` variant)
//! and nothing else, so this is a paired-delimiter scan rather than a
//! markdown parser. A delimiter only closes the same delimiter that
//! opened, matching is non-greedy, and unmatched delimiters stay literal.

use crate::types::Span;

/// Split a line of text into alternating plain/bold spans.
///
/// Text without a matched pair comes back as a single plain span.
pub fn format_spans(text: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    loop {
        let delim = match (rest.find("**"), rest.find("__")) {
            (Some(s), Some(u)) if s <= u => ("**", s),
            (_, Some(u)) => ("__", u),
            (Some(s), None) => ("**", s),
            (None, None) => break,
        };
        let (token, at) = delim;
        let after = &rest[at + 2..];

        match after.find(token) {
            Some(close) if close > 0 => {
                plain.push_str(&rest[..at]);
                if !plain.is_empty() {
                    spans.push(Span::plain(std::mem::take(&mut plain)));
                }
                spans.push(Span::strong(&after[..close]));
                rest = &after[close + 2..];
            }
            // Unmatched or empty pair: keep the delimiter as literal text
            _ => {
                plain.push_str(&rest[..at + 2]);
                rest = &rest[at + 2..];
            }
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() || spans.is_empty() {
        spans.push(Span::plain(plain));
    }
    spans
}
