//! Fixed-size two-dimensional storage for board cells.
//!
//! Generic over the board width (`COLUMNS`) and height (`ROWS`). Cells are
//! stored column-major, each holding an optional value. Every access is
//! bounds-checked: an out-of-range coordinate is a caller bug and panics.

use crate::geometry::Coord;

/// A `COLUMNS` x `ROWS` grid of optional values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T, const COLUMNS: usize, const ROWS: usize> {
    cells: [[Option<T>; ROWS]; COLUMNS],
}

impl<T, const COLUMNS: usize, const ROWS: usize> Grid<T, COLUMNS, ROWS> {
    /// Creates a grid with every cell empty.
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    pub const fn columns(&self) -> usize {
        COLUMNS
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    #[inline(always)]
    pub const fn contains(column: usize, row: usize) -> bool {
        column < COLUMNS && row < ROWS
    }

    #[inline(always)]
    fn check(column: usize, row: usize) {
        assert!(
            Self::contains(column, row),
            "cell ({}, {}) is outside the {}x{} grid",
            column,
            row,
            COLUMNS,
            ROWS
        );
    }

    /// Returns the value at a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        Self::check(column, row);
        self.cells[column][row].as_ref()
    }

    /// Returns a mutable reference to the value at a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    #[inline]
    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut T> {
        Self::check(column, row);
        self.cells[column][row].as_mut()
    }

    /// Stores a value (or clears the cell with `None`), returning the old value.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    pub fn set(&mut self, column: usize, row: usize, value: Option<T>) -> Option<T> {
        Self::check(column, row);
        std::mem::replace(&mut self.cells[column][row], value)
    }

    /// Empties a cell, returning what it held.
    pub fn take(&mut self, column: usize, row: usize) -> Option<T> {
        self.set(column, row, None)
    }

    /// Exchanges the contents of two cells.
    ///
    /// # Panics
    ///
    /// Panics if either cell is outside the grid.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let first = self.take(a.0, a.1);
        let second = self.set(b.0, b.1, first);
        self.set(a.0, a.1, second);
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        for column in &mut self.cells {
            for cell in column {
                *cell = None;
            }
        }
    }

    /// Iterates over occupied cells, column by column, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        self.cells.iter().enumerate().flat_map(|(column, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(row, cell)| cell.as_ref().map(|value| ((column, row), value)))
        })
    }
}

impl<T, const COLUMNS: usize, const ROWS: usize> Default for Grid<T, COLUMNS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}
