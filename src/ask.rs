//! Single-turn transcript Q&A decoding.
//!
//! Deliberately stricter than the notes decoder: the response must be one
//! fenced JSON block carrying the four required fields, correctly typed.
//! There is no fallback ladder — a single Q&A turn has nothing sensible to
//! degrade to, so any mismatch yields a displayable format-error sentinel
//! instead.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::types::TranscriptAnswer;

/// Answer text shown when the response does not match the contract.
pub const FORMAT_ERROR_ANSWER: &str =
    "The response did not match the expected format, so the answer could not be read.";

#[derive(Debug, Deserialize)]
struct WireAnswer {
    question: String,
    answer: String,
    not_in_transcript: bool,
    follow_up_suggestions: Vec<String>,
}

fn re_fenced_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?i:json)?\s*(\{.*?\})\s*```").unwrap())
}

/// Decode a Q&A response. Never fails: contract violations come back as a
/// sentinel flagged `not_in_transcript` so the caller can present an error
/// state without special-casing.
pub fn decode_answer(raw: &str) -> TranscriptAnswer {
    let parsed = re_fenced_block()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| serde_json::from_str::<WireAnswer>(m.as_str()).ok());

    match parsed {
        Some(wire) => TranscriptAnswer {
            question: wire.question,
            answer: wire.answer,
            not_in_transcript: wire.not_in_transcript,
            follow_up_suggestions: wire.follow_up_suggestions,
        },
        None => {
            log::warn!("Q&A response did not contain a valid fenced JSON answer");
            TranscriptAnswer {
                question: String::new(),
                answer: FORMAT_ERROR_ANSWER.to_string(),
                not_in_transcript: true,
                follow_up_suggestions: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"```json
{"question": "Who owns QA?", "answer": "Dana owns QA for the launch.", "not_in_transcript": false, "follow_up_suggestions": ["When is the QA signoff?"]}
```"#;

    #[test]
    fn test_valid_fenced_answer_decodes() {
        let result = decode_answer(VALID);
        assert_eq!(result.question, "Who owns QA?");
        assert_eq!(result.answer, "Dana owns QA for the launch.");
        assert!(!result.not_in_transcript);
        assert_eq!(result.follow_up_suggestions.len(), 1);
    }

    #[test]
    fn test_fence_surrounded_by_prose_still_decodes() {
        let raw = format!("Here is what I found:\n\n{}\n\nHope that helps.", VALID);
        let result = decode_answer(&raw);
        assert_eq!(result.question, "Who owns QA?");
    }

    #[test]
    fn test_no_fence_yields_sentinel() {
        let result = decode_answer("no fence here");
        assert!(result.not_in_transcript);
        assert!(!result.answer.is_empty());
        assert!(result.follow_up_suggestions.is_empty());
        assert_eq!(result.question, "");
    }

    #[test]
    fn test_bare_json_without_fence_is_rejected() {
        // The notes decoder would accept this; the Q&A contract does not
        let raw = r#"{"question": "q", "answer": "a", "not_in_transcript": false, "follow_up_suggestions": []}"#;
        let result = decode_answer(raw);
        assert!(result.not_in_transcript);
        assert_eq!(result.answer, FORMAT_ERROR_ANSWER);
    }

    #[test]
    fn test_missing_field_yields_sentinel() {
        let raw = "```json\n{\"question\": \"q\", \"answer\": \"a\"}\n```";
        let result = decode_answer(raw);
        assert!(result.not_in_transcript);
        assert_eq!(result.answer, FORMAT_ERROR_ANSWER);
    }

    #[test]
    fn test_mistyped_field_yields_sentinel() {
        let raw = "```json\n{\"question\": \"q\", \"answer\": \"a\", \"not_in_transcript\": \"nope\", \"follow_up_suggestions\": []}\n```";
        let result = decode_answer(raw);
        assert!(result.not_in_transcript);
    }

    #[test]
    fn test_unparseable_fence_yields_sentinel() {
        let result = decode_answer("```json\n{not json}\n```");
        assert!(result.not_in_transcript);
        assert_eq!(result.answer, FORMAT_ERROR_ANSWER);
    }
}
