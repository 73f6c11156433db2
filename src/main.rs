//! Command-line front end for the recap pipeline.
//!
//! Reads a raw upstream response body from a file, decodes it, builds the
//! block sequence, and prints the result as pretty JSON on stdout. `--qa`
//! runs the stricter single-turn Q&A decoder instead. This binary is the
//! only part of the crate that touches a filesystem or initializes logging.
//!
//! Usage: `recap <response-file> [--glyphs] [--qa] [--no-next-steps-override]`

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use recap::document::sections;
use recap::{
    build_document, decode_answer, decode_notes_response, render_action_table, Block,
    NotesDocument, RecapError, SectionOverride, TranscriptAnswer,
};

#[derive(Debug)]
struct Options {
    input: PathBuf,
    glyphs: bool,
    qa: bool,
    next_steps_override: bool,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, RecapError> {
        let mut input = None;
        let mut glyphs = false;
        let mut qa = false;
        let mut next_steps_override = true;

        for arg in args {
            match arg.as_str() {
                "--glyphs" => glyphs = true,
                "--qa" => qa = true,
                "--no-next-steps-override" => next_steps_override = false,
                flag if flag.starts_with("--") => {
                    return Err(RecapError::UnknownFlag(flag.to_string()))
                }
                path => {
                    if input.replace(PathBuf::from(path)).is_some() {
                        return Err(RecapError::Usage);
                    }
                }
            }
        }

        Ok(Options {
            input: input.ok_or(RecapError::Usage)?,
            glyphs,
            qa,
            next_steps_override,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotesReport {
    generated_at: String,
    document: NotesDocument,
    blocks: Vec<Block>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerReport {
    generated_at: String,
    answer: TranscriptAnswer,
}

fn notes_report(raw: &str, opts: &Options) -> Result<String, RecapError> {
    let document = decode_notes_response(raw);
    let replacement = opts.next_steps_override.then(|| SectionOverride {
        title: sections::NEXT_STEPS_TITLE.to_string(),
        block: render_action_table(&document.action_items, opts.glyphs),
    });
    let blocks = build_document(&document.markdown, replacement.as_ref());
    let report = NotesReport {
        generated_at: Utc::now().to_rfc3339(),
        document,
        blocks,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn answer_report(raw: &str) -> Result<String, RecapError> {
    let report = AnswerReport {
        generated_at: Utc::now().to_rfc3339(),
        answer: decode_answer(raw),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn run(opts: &Options) -> Result<String, RecapError> {
    let raw = std::fs::read_to_string(&opts.input).map_err(|source| RecapError::ReadInput {
        path: opts.input.clone(),
        source,
    })?;
    if opts.qa {
        answer_report(&raw)
    } else {
        notes_report(&raw, opts)
    }
}

fn main() {
    env_logger::init();
    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    match run(&opts) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
