//! Error types for loading, remapping and saving GEDCOM files.

use std::path::PathBuf;

use thiserror::Error;

/// Structural violations found while building a [`RecordTree`](crate::tree::RecordTree).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Level is not a number, or jumps more than one deeper than the previous line.
    #[error("invalid level at line {line}: {text:?}")]
    InvalidLevel {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// Line has a level (and maybe an xref) but no tag.
    #[error("missing tag at line {line}: {text:?}")]
    MissingTag { line: usize, text: String },
}

#[derive(Debug, Error)]
pub enum Rin2IdError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("cannot decode input as {charset}: {reason}")]
    Encoding {
        charset: &'static str,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T, E = Rin2IdError> = std::result::Result<T, E>;
