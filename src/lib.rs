//! Decoding and document building for AI meeting-recap responses.
//!
//! The upstream text service returns one of several historically-accumulated
//! shapes: bare JSON, fenced JSON, nested workstream JSON, legacy markdown
//! with a trailing JSON block, or plain text. [`decoder`] normalizes all of
//! them into a canonical [`types::NotesDocument`]; [`document`] tokenizes
//! its markdown into renderable blocks, injecting the caller-rendered
//! next-steps table in place of the raw section. [`ask`] handles the
//! stricter single-turn transcript Q&A contract. Every stage is pure and
//! total: no input makes any of them fail.

pub mod ask;
pub mod decoder;
pub mod document;
pub mod error;
pub mod types;

pub use ask::decode_answer;
pub use decoder::decode_notes_response;
pub use document::build_document;
pub use document::table::render_action_table;
pub use error::RecapError;
pub use types::{
    ActionItem, ActionStatus, Block, CoachInsights, NotesDocument, SectionOverride, Span,
    TableRow, TranscriptAnswer,
};
