//! Error types shared across the library

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by graph loading, clustering, and comparison.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened, or a lookup referenced a node the
    /// graph or clustering does not contain.
    #[error("not found: {0}")]
    NotFound(String),

    /// A malformed line in an adjacency-list file.
    #[error("format error at line {line}: {message}")]
    Format {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong on that line.
        message: String,
    },

    /// Two clusterings being compared do not cover the same number of nodes.
    #[error("incompatible clusterings: {left} vs {right} nodes")]
    IncompatibleInput {
        /// Node count of the first clustering.
        left: usize,
        /// Node count of the second clustering.
        right: usize,
    },

    /// A maximum was requested over an empty collection.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Underlying I/O failure while reading or writing.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure serializing results to JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
