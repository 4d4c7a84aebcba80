//! Level layout files.
//!
//! A layout is a JSON object whose `tiles` field lists the board rows from
//! top to bottom, each row a list of per-column flags (`1` open, `0` hole):
//!
//! ```json
//! { "tiles": [[0, 1, 1], [1, 1, 1], [1, 1, 0]] }
//! ```
//!
//! Other fields (target score, move limits) belong to the game rules layer
//! and are ignored here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Raw layout record as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub tiles: Vec<Vec<u8>>,
}

impl LevelLayout {
    /// A layout with every cell open.
    pub fn full(columns: usize, rows: usize) -> Self {
        Self {
            tiles: vec![vec![1; columns]; rows],
        }
    }

    /// Parses a layout from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Converts the layout into a column-major open-cell mask.
    ///
    /// The first layout row becomes the top board row (`rows - 1`) so row 0
    /// is the bottom of the board. The mask is indexed `[column][row]`.
    pub fn open_cells<const COLUMNS: usize, const ROWS: usize>(
        &self,
    ) -> Result<[[bool; ROWS]; COLUMNS], LevelError> {
        if self.tiles.len() != ROWS {
            return Err(LevelError::RowCount {
                expected: ROWS,
                found: self.tiles.len(),
            });
        }

        let mut mask = [[false; ROWS]; COLUMNS];
        for (line, values) in self.tiles.iter().enumerate() {
            let row = ROWS - line - 1;
            if values.len() != COLUMNS {
                return Err(LevelError::ColumnCount {
                    row,
                    expected: COLUMNS,
                    found: values.len(),
                });
            }
            for (column, &value) in values.iter().enumerate() {
                mask[column][row] = match value {
                    0 => false,
                    1 => true,
                    _ => return Err(LevelError::InvalidTileValue { row, column, value }),
                };
            }
        }

        Ok(mask)
    }
}
