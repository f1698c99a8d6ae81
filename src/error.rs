//! Error types for table I/O and lookups

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by table operations.
///
/// Parsing itself never fails: malformed quoting always produces some table.
/// Only file I/O, rendering and explicit non-growing lookups report errors.
#[derive(Debug, Error)]
pub enum TableError {
    /// Opening, reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing rendered output to a caller-supplied writer failed.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    /// A non-growing accessor addressed a cell that does not exist.
    #[error("cell ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },

    /// `save_file()` was called on a table that was never given a path.
    #[error("table has no file path to save to")]
    MissingPath,

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
