//! Swap proposals and the search for legal swaps.
//!
//! A swap is legal when exchanging its two pieces lines up at least three
//! pieces of one kind through either of the swapped cells. The search walks
//! every occupied cell, tentatively exchanges it with its right and upper
//! neighbor, probes both cells and exchanges them back.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::geometry::{self, Coord, Direction};
use crate::level::Level;
use crate::pieces::{Piece, PieceType};

/// Minimum number of aligned pieces that makes a chain.
pub const MIN_CHAIN_LENGTH: usize = 3;

/// A proposal to exchange two pieces.
///
/// Equality and hashing ignore the order of the two pieces, so
/// `Swap::new(a, b) == Swap::new(b, a)`.
#[derive(Debug, Clone, Copy)]
pub struct Swap {
    from: Piece,
    to: Piece,
}

impl Swap {
    pub fn new(from: Piece, to: Piece) -> Self {
        Self { from, to }
    }

    /// The piece the user started dragging.
    pub fn from(&self) -> Piece {
        self.from
    }

    pub fn to(&self) -> Piece {
        self.to
    }

    /// Both cells, lowest coordinate first.
    fn cells(&self) -> (Coord, Coord) {
        let (a, b) = (self.from.coord(), self.to.coord());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        self.cells() == other.cells()
    }
}

impl Eq for Swap {}

impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells().hash(state);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} with {}", self.from, self.to)
    }
}

impl<const COLUMNS: usize, const ROWS: usize> Level<COLUMNS, ROWS> {
    /// Whether the piece at a cell sits in a run of at least three pieces of
    /// its kind, horizontally or vertically. Empty cells never do.
    pub fn has_chain_through(&self, column: usize, row: usize) -> bool {
        let Some(kind) = self.kind_at(column, row) else {
            return false;
        };

        let horizontal = 1
            + self.run_length((column, row), kind, Direction::Left)
            + self.run_length((column, row), kind, Direction::Right);
        if horizontal >= MIN_CHAIN_LENGTH {
            return true;
        }

        let vertical = 1
            + self.run_length((column, row), kind, Direction::Down)
            + self.run_length((column, row), kind, Direction::Up);
        vertical >= MIN_CHAIN_LENGTH
    }

    /// Counts consecutive pieces of `kind` next to `start` in one direction,
    /// stopping at the board edge.
    fn run_length(&self, start: Coord, kind: PieceType, direction: Direction) -> usize {
        let mut count = 0;
        let mut coord = start;
        while let Some(next) = geometry::step(coord, direction, COLUMNS, ROWS) {
            if self.kind_at(next.0, next.1) != Some(kind) {
                break;
            }
            count += 1;
            coord = next;
        }
        count
    }

    /// Exchanges two cells, checks both for a chain and exchanges them back.
    fn swap_creates_chain(&mut self, a: Coord, b: Coord) -> bool {
        self.exchange(a, b);
        let creates_chain = self.has_chain_through(a.0, a.1) || self.has_chain_through(b.0, b.1);
        self.exchange(a, b);
        creates_chain
    }

    /// Finds every legal swap on the board and caches the result for
    /// [`Level::is_possible`].
    ///
    /// The board is mutated while probing but is left exactly as it was.
    pub fn detect_possible_swaps(&mut self) -> &FxHashSet<Swap> {
        let mut found = FxHashSet::default();

        for column in 0..COLUMNS {
            for row in 0..ROWS {
                let Some(piece) = self.piece_at(column, row) else {
                    continue;
                };

                for direction in [Direction::Right, Direction::Up] {
                    let Some(target) = geometry::step((column, row), direction, COLUMNS, ROWS)
                    else {
                        continue;
                    };
                    let Some(other) = self.piece_at(target.0, target.1) else {
                        continue;
                    };

                    if self.swap_creates_chain((column, row), target) {
                        found.insert(Swap::new(piece, other));
                    }
                }
            }
        }

        debug!(count = found.len(), "detected possible swaps");
        self.possible_swaps = found;
        &self.possible_swaps
    }

    /// The legal swaps found by the last [`Level::detect_possible_swaps`].
    ///
    /// Stale after any change to the pieces until detection runs again.
    pub fn possible_swaps(&self) -> &FxHashSet<Swap> {
        &self.possible_swaps
    }

    /// Whether a swap was legal as of the last detection.
    pub fn is_possible(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }
}
