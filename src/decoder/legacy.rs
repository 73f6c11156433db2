//! Trailing-JSON extraction for the legacy markdown+JSON response format.
//!
//! Older responses carried the markdown body followed by the structured
//! fields as one JSON object, either inside a code fence closing the
//! response or bare. Bare detection brackets the last occurrence of the
//! action-items key between the nearest preceding `{` and the last `}` in
//! the text. That is a best-effort heuristic: a body with stray braces can
//! mis-bracket, in which case the candidate fails to parse and the caller
//! strips it rather than displaying partial JSON.

/// Wire key that marks the structured action-items payload.
pub const ACTION_ITEMS_KEY: &str = "\"next_steps\"";

/// A located trailing-JSON candidate: the byte offset where the block
/// (including any fence) starts, and the JSON text inside it.
#[derive(Debug, PartialEq)]
pub struct TrailingCandidate<'a> {
    pub start: usize,
    pub json: &'a str,
}

/// Locate a trailing JSON block: fenced first, bare-key fallback second.
pub fn find_trailing_json(raw: &str) -> Option<TrailingCandidate<'_>> {
    find_fenced_tail(raw).or_else(|| find_bare_tail(raw))
}

/// A code fence closing at end-of-string whose body is an object.
fn find_fenced_tail(raw: &str) -> Option<TrailingCandidate<'_>> {
    let trimmed = raw.trim_end();
    if !trimmed.ends_with("```") {
        return None;
    }
    let close = trimmed.len() - 3;
    let open = trimmed[..close].rfind("```")?;

    let mut body = trimmed[open + 3..close].trim_start();
    for tag in ["json", "JSON"] {
        if let Some(rest) = body.strip_prefix(tag) {
            body = rest.trim_start();
            break;
        }
    }
    let body = body.trim();
    if !body.starts_with('{') || !body.ends_with('}') {
        return None;
    }
    Some(TrailingCandidate {
        start: open,
        json: body,
    })
}

/// Bracket a bare JSON tail around the last action-items key.
///
/// The candidate always contains the key; whether it parses is for the
/// caller to find out.
fn find_bare_tail(raw: &str) -> Option<TrailingCandidate<'_>> {
    let key_pos = raw.rfind(ACTION_ITEMS_KEY)?;
    let start = raw[..key_pos].rfind('{')?;
    let end = raw.rfind('}')?;
    if end <= key_pos {
        return None;
    }
    Some(TrailingCandidate {
        start,
        json: &raw[start..=end],
    })
}
