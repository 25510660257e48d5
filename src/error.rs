//! Error types for the recoverable paths (level files, settings files)

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or parse a level grid
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unparsable tile {token:?} at row {row}, column {column}")]
    Malformed {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("unknown tile code {code} at row {row}, column {column}")]
    InvalidTile { row: usize, column: usize, code: i64 },
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failure to read or write the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
