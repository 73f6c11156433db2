//! Response decoding: raw upstream text → canonical [`NotesDocument`].
//!
//! The upstream service has accumulated several response shapes over its
//! lifetime: bare JSON, fenced JSON, nested workstream JSON, legacy
//! markdown with a trailing JSON block, and plain text. Decoding runs an
//! ordered list of self-contained strategies; a parse failure inside one
//! falls through to the next instead of propagating, and the final
//! fallback treats the whole response as markdown. Decoding never fails.

pub mod legacy;
pub mod wire;

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::document::sections;
use crate::types::NotesDocument;

type Strategy = fn(&str) -> Option<NotesDocument>;

/// Ordered strategy ladder; the first hit wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("flat-json", decode_flat_json),
    ("structured-json", decode_structured_json),
    ("trailing-json", decode_trailing_json),
];

/// Decode a raw response body into the canonical document shape.
///
/// Total by construction: whatever the input, the result carries a
/// markdown string and (possibly empty) structured fields.
pub fn decode_notes_response(raw: &str) -> NotesDocument {
    let text = unwrap_code_fence(raw);
    for (name, strategy) in STRATEGIES {
        if let Some(doc) = strategy(text) {
            log::debug!("response decoded via {} strategy", name);
            warn_on_malformed_due_dates(&doc);
            return doc;
        }
    }
    log::debug!("no decode strategy matched; treating response as markdown");
    NotesDocument::from_markdown(text)
}

fn re_fence_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```(?i:json)?\s*").unwrap())
}

/// Strip a code fence that wraps the entire response, tag and all.
fn unwrap_code_fence(raw: &str) -> &str {
    let t = raw.trim();
    if t.len() < 6 || !t.starts_with("```") || !t.ends_with("```") {
        return t;
    }
    let open_len = re_fence_open()
        .find(t)
        .map(|m| m.end())
        .unwrap_or(3);
    if open_len > t.len() - 3 {
        return t;
    }
    let inner = &t[open_len..t.len() - 3];
    // A fence inside the candidate body means the text starts and ends with
    // two different blocks rather than being wrapped in one.
    if inner.contains("```") {
        return t;
    }
    inner.trim()
}

/// Current format: one flat JSON object with a `markdown` field.
fn decode_flat_json(text: &str) -> Option<NotesDocument> {
    if !looks_like_object(text) {
        return None;
    }
    let res: wire::WireFlatResponse = serde_json::from_str(text).ok()?;
    Some(NotesDocument {
        markdown: res.markdown,
        action_items: res
            .next_steps
            .into_iter()
            .map(wire::WireActionItem::into_domain)
            .collect(),
        coach_insights: res.coach_insights.map(wire::WireCoachInsights::into_domain),
        suggested_questions: wire::filter_questions(&res.suggested_questions),
    })
}

/// Nested workstream format: markdown is synthesized from the structure.
fn decode_structured_json(text: &str) -> Option<NotesDocument> {
    if !looks_like_object(text) {
        return None;
    }
    let res: wire::WireStructuredResponse = serde_json::from_str(text).ok()?;
    let markdown = synthesize_markdown(&res);
    Some(NotesDocument {
        markdown,
        action_items: res
            .next_steps
            .into_iter()
            .map(wire::WireActionItem::into_domain)
            .collect(),
        coach_insights: res.coach_insights.map(wire::WireCoachInsights::into_domain),
        suggested_questions: wire::filter_questions(&res.suggested_questions),
    })
}

/// Legacy format: markdown body followed by a trailing JSON block.
fn decode_trailing_json(text: &str) -> Option<NotesDocument> {
    let cand = legacy::find_trailing_json(text)?;
    let before = text[..cand.start].trim();

    match serde_json::from_str::<wire::WireLegacyTail>(cand.json) {
        Ok(tail) => {
            let markdown = if before.is_empty() {
                tail.markdown.unwrap_or_default()
            } else {
                before.to_string()
            };
            Some(NotesDocument {
                markdown,
                action_items: tail
                    .next_steps
                    .into_iter()
                    .map(wire::WireActionItem::into_domain)
                    .collect(),
                coach_insights: tail.coach_insights.map(wire::WireCoachInsights::into_domain),
                suggested_questions: wire::filter_questions(&tail.suggested_questions),
            })
        }
        Err(err) => {
            // Never show a half-parsed JSON blob to the user: strip it from
            // the markdown even though it yielded no structured fields.
            log::warn!("trailing JSON block did not parse ({}); stripping it", err);
            Some(NotesDocument::from_markdown(before))
        }
    }
}

fn looks_like_object(text: &str) -> bool {
    text.starts_with('{') && text.ends_with('}')
}

/// Render the nested workstream structure as canonical markdown.
///
/// Action items get a header-only NEXT STEPS marker; the table itself is
/// supplied at render time by the presentation layer.
fn synthesize_markdown(res: &wire::WireStructuredResponse) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n", res.title.trim()));

    if let Some(purpose) = res.purpose.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        md.push('\n');
        md.push_str(&format!("{} {}\n", sections::PURPOSE_PREFIX, purpose));
    }

    for ws in &res.workstreams {
        md.push('\n');
        md.push_str(&format!("{} {}\n", sections::WORKSTREAM_GLYPH, ws.name.trim()));

        let subsections = [
            (&sections::DISCUSSION_SECTION, &ws.key_discussion_points),
            (&sections::DECISIONS_SECTION, &ws.decisions_made),
            (&sections::RISKS_SECTION, &ws.risks_or_open_questions),
        ];
        for (spec, entries) in subsections {
            md.push('\n');
            md.push_str(&format!("{} {}\n", spec.icon, spec.title));
            let items: Vec<String> = entries.iter().filter_map(wire::entry_text).collect();
            if items.is_empty() {
                md.push_str("No notes for this section.\n");
            } else {
                for item in items {
                    md.push_str(&format!("- {}\n", item));
                }
            }
        }
    }

    if !res.next_steps.is_empty() {
        md.push('\n');
        md.push_str(&format!("## {}\n", sections::NEXT_STEPS_TITLE));
    }
    md
}

fn warn_on_malformed_due_dates(doc: &NotesDocument) {
    for item in &doc.action_items {
        let due = item.due_date.trim();
        if !due.is_empty() && NaiveDate::parse_from_str(due, "%Y-%m-%d").is_err() {
            log::warn!("action item due date '{}' is not YYYY-MM-DD", due);
        }
    }
}
