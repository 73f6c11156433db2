//! Error types for the CLI surface.
//!
//! The decode/build pipeline itself is total — it degrades instead of
//! failing and never returns an error. `RecapError` covers the file I/O
//! and argument handling around it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecapError {
    #[error("usage: recap <response-file> [--glyphs] [--qa] [--no-next-steps-override]")]
    Usage,

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
