use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical document shape every decode strategy converges on.
///
/// `markdown` is always present — on total decode failure it carries the
/// raw response verbatim. The vectors are always present, possibly empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesDocument {
    pub markdown: String,
    pub action_items: Vec<ActionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_insights: Option<CoachInsights>,
    pub suggested_questions: Vec<String>,
}

impl NotesDocument {
    /// Wrap plain markdown with empty structured fields.
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            action_items: Vec::new(),
            coach_insights: None,
            suggested_questions: Vec::new(),
        }
    }
}

/// One row of the next-steps table. Display order equals source order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub department: String,
    pub owner: String,
    pub task: String,
    pub due_date: String,
    pub status: ActionStatus,
    pub status_notes: String,
}

impl ActionItem {
    /// Render the due date as "Sep 2, 2025" when it is a valid
    /// `YYYY-MM-DD` date; anything else is echoed verbatim.
    pub fn due_date_display(&self) -> String {
        match NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d") {
            Ok(date) => {
                use chrono::Datelike;
                format!("{} {}, {}", month_abbrev(&date), date.day(), date.year())
            }
            Err(_) => self.due_date.clone(),
        }
    }
}

fn month_abbrev(date: &NaiveDate) -> &'static str {
    use chrono::Datelike;
    match date.month() {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// RAG status of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionStatus {
    Green,
    Amber,
    Red,
    #[default]
    Unspecified,
}

impl ActionStatus {
    /// Map a wire status string; anything unrecognized is `Unspecified`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "GREEN" => ActionStatus::Green,
            "AMBER" => ActionStatus::Amber,
            "RED" => ActionStatus::Red,
            _ => ActionStatus::Unspecified,
        }
    }

    /// Colored indicator for table cells.
    pub fn glyph(self) -> &'static str {
        match self {
            ActionStatus::Green => "🟢",
            ActionStatus::Amber => "🟡",
            ActionStatus::Red => "🔴",
            ActionStatus::Unspecified => "—",
        }
    }

    /// Literal label for table cells when glyphs are disabled.
    pub fn label(self) -> &'static str {
        match self {
            ActionStatus::Green => "GREEN",
            ActionStatus::Amber => "AMBER",
            ActionStatus::Red => "RED",
            ActionStatus::Unspecified => "—",
        }
    }
}

/// Facilitation feedback extracted alongside the notes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachInsights {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub facilitation_tips: Vec<String>,
    pub metrics: InsightMetrics,
    pub flags: BTreeMap<String, bool>,
}

/// Meeting-quality metrics, percentages in 0–100.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightMetrics {
    pub agenda_coverage_pct: f64,
    pub decision_count: u32,
    pub actions_with_owner_pct: f64,
    pub actions_with_due_date_pct: f64,
    pub top_speaker_share_pct: f64,
}

/// One run of text inside a block, plain or bold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub text: String,
    pub strong: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            strong: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            strong: true,
        }
    }
}

/// One typed, renderable unit of the tokenized document.
///
/// Blocks are immutable once produced; the sequence is the sole output of
/// the document builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        text: Vec<Span>,
    },
    Paragraph {
        text: Vec<Span>,
        italic: bool,
    },
    List {
        items: Vec<Vec<Span>>,
    },
    Table {
        headers: Vec<Vec<Span>>,
        rows: Vec<TableRow>,
    },
    Divider,
    /// Caller-supplied content injected in place of an overridden section.
    Replacement { content: Box<Block> },
}

/// One data row of a table. `zebra` alternates per row for striping and
/// carries no meaning beyond presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub cells: Vec<Vec<Span>>,
    pub zebra: bool,
}

/// A named section whose raw markdown content is discarded in favor of a
/// structurally-rendered block supplied by the caller.
#[derive(Debug, Clone)]
pub struct SectionOverride {
    pub title: String,
    pub block: Block,
}

/// Decoded single-turn transcript Q&A response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptAnswer {
    pub question: String,
    pub answer: String,
    pub not_in_transcript: bool,
    pub follow_up_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_values() {
        assert_eq!(ActionStatus::parse("GREEN"), ActionStatus::Green);
        assert_eq!(ActionStatus::parse("amber"), ActionStatus::Amber);
        assert_eq!(ActionStatus::parse(" Red "), ActionStatus::Red);
    }

    #[test]
    fn test_status_parse_unknown_is_unspecified() {
        assert_eq!(ActionStatus::parse("BLUE"), ActionStatus::Unspecified);
        assert_eq!(ActionStatus::parse(""), ActionStatus::Unspecified);
    }

    fn item_with_due(due: &str) -> ActionItem {
        ActionItem {
            department: "XD".to_string(),
            owner: "Casey".to_string(),
            task: "Mock up designs".to_string(),
            due_date: due.to_string(),
            status: ActionStatus::Green,
            status_notes: String::new(),
        }
    }

    #[test]
    fn test_due_date_display_valid() {
        assert_eq!(item_with_due("2025-09-02").due_date_display(), "Sep 2, 2025");
        assert_eq!(item_with_due("2026-12-31").due_date_display(), "Dec 31, 2026");
    }

    #[test]
    fn test_due_date_display_malformed_is_verbatim() {
        assert_eq!(item_with_due("next Friday").due_date_display(), "next Friday");
        assert_eq!(item_with_due("").due_date_display(), "");
    }

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let json = serde_json::to_value(Block::Divider).unwrap();
        assert_eq!(json["kind"], "divider");

        let heading = Block::Heading {
            level: 2,
            id: Some("next-steps".to_string()),
            text: vec![Span::plain("NEXT STEPS")],
        };
        let json = serde_json::to_value(heading).unwrap();
        assert_eq!(json["kind"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["id"], "next-steps");
    }
}
