//! Wire-format structs for the JSON response shapes.
//!
//! The upstream service has gone through several response formats. Each
//! shape gets its own deserialization target; fields default aggressively
//! and accept legacy aliases where a format change renamed a key. List
//! entries that may arrive as either plain strings or `{text, emphasis}`
//! objects are held as raw values and normalized here, so no downstream
//! component sees the legacy shape.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::types::{ActionItem, ActionStatus, CoachInsights, InsightMetrics};

/// Flat response: canonical markdown plus structured siblings.
#[derive(Debug, Deserialize)]
pub struct WireFlatResponse {
    pub markdown: String,
    #[serde(default, alias = "action_items")]
    pub next_steps: Vec<WireActionItem>,
    #[serde(default)]
    pub coach_insights: Option<WireCoachInsights>,
    #[serde(default)]
    pub suggested_questions: Vec<Value>,
}

/// Structured response: nested workstream notes instead of markdown.
#[derive(Debug, Deserialize)]
pub struct WireStructuredResponse {
    pub title: String,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(alias = "workstream_notes")]
    pub workstreams: Vec<WireWorkstream>,
    #[serde(default, alias = "action_items")]
    pub next_steps: Vec<WireActionItem>,
    #[serde(default)]
    pub coach_insights: Option<WireCoachInsights>,
    #[serde(default)]
    pub suggested_questions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WireWorkstream {
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub key_discussion_points: Vec<Value>,
    #[serde(default)]
    pub decisions_made: Vec<Value>,
    #[serde(default, alias = "risks")]
    pub risks_or_open_questions: Vec<Value>,
}

/// Trailing JSON block of the legacy markdown+JSON format.
#[derive(Debug, Default, Deserialize)]
pub struct WireLegacyTail {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default, alias = "action_items")]
    pub next_steps: Vec<WireActionItem>,
    #[serde(default)]
    pub coach_insights: Option<WireCoachInsights>,
    #[serde(default)]
    pub suggested_questions: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireActionItem {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_notes: String,
}

impl WireActionItem {
    pub fn into_domain(self) -> ActionItem {
        ActionItem {
            department: self.department,
            owner: self.owner,
            task: self.task,
            due_date: self.due_date,
            status: ActionStatus::parse(&self.status),
            status_notes: self.status_notes,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WireCoachInsights {
    #[serde(default)]
    pub strengths: Vec<Value>,
    #[serde(default)]
    pub improvements: Vec<Value>,
    #[serde(default)]
    pub facilitation_tips: Vec<Value>,
    #[serde(default)]
    pub metrics: WireInsightMetrics,
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireInsightMetrics {
    #[serde(default)]
    pub agenda_coverage_pct: f64,
    #[serde(default)]
    pub decision_count: u32,
    #[serde(default)]
    pub actions_with_owner_pct: f64,
    #[serde(default)]
    pub actions_with_due_date_pct: f64,
    #[serde(default)]
    pub top_speaker_share_pct: f64,
}

impl WireCoachInsights {
    pub fn into_domain(self) -> CoachInsights {
        CoachInsights {
            strengths: normalize_entries(&self.strengths),
            improvements: normalize_entries(&self.improvements),
            facilitation_tips: normalize_entries(&self.facilitation_tips),
            metrics: InsightMetrics {
                agenda_coverage_pct: self.metrics.agenda_coverage_pct,
                decision_count: self.metrics.decision_count,
                actions_with_owner_pct: self.metrics.actions_with_owner_pct,
                actions_with_due_date_pct: self.metrics.actions_with_due_date_pct,
                top_speaker_share_pct: self.metrics.top_speaker_share_pct,
            },
            flags: self.flags,
        }
    }
}

/// Display text of a string-or-object list entry, if it has any.
///
/// Strings pass through; objects contribute their `text` field. Empty and
/// shapeless entries yield `None` so callers can skip them.
pub fn entry_text(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        return Some(s.to_string());
    }
    if let Some(obj) = value.as_object() {
        if let Some(text) = obj.get("text").and_then(|v| v.as_str()) {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Normalize one string-or-object insight entry to a plain string.
///
/// Unlike [`entry_text`] nothing is dropped: entries that are neither a
/// string nor a `{text: …}` object come back in their JSON display form.
pub fn normalize_entry(value: &Value) -> String {
    if let Some(s) = value.as_str() {
        return s.to_string();
    }
    if let Some(text) = value.as_object().and_then(|o| o.get("text")).and_then(|v| v.as_str()) {
        return text.to_string();
    }
    value.to_string()
}

fn normalize_entries(values: &[Value]) -> Vec<String> {
    values.iter().map(normalize_entry).collect()
}

/// Keep only the string entries of a suggested-questions array.
pub fn filter_questions(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect()
}
