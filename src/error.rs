//! Errors raised while loading levels and generating arrangements.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or populating a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read
    #[error("failed to read level file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The level data is not valid JSON for a layout
    #[error("failed to parse level layout: {0}")]
    Parse(#[from] serde_json::Error),

    /// The layout has the wrong number of rows
    #[error("layout has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    /// A layout row has the wrong number of columns
    #[error("layout row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A tile flag other than 0 or 1
    #[error("layout row {row} column {column} has tile value {value}, expected 0 or 1")]
    InvalidTileValue { row: usize, column: usize, value: u8 },

    /// Every cell of the level is a hole
    #[error("level has no open tiles")]
    NoOpenTiles,

    /// No arrangement with a legal swap was found within the attempt limit
    #[error("no playable arrangement found after {attempts} attempts")]
    Unplayable { attempts: usize },
}
