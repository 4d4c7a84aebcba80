//! The board: tiles, pieces, arrangement generation and swap application.
//!
//! Swap legality lives in [`crate::swaps`], chain detection in
//! [`crate::chains`] and refill bookkeeping in [`crate::cascade`]; all of them
//! extend [`Level`] with further `impl` blocks.
//!
//! A level is a single-threaded value. Derived state (the legal-swap set) is
//! never refreshed behind the caller's back: after any mutation the caller
//! decides when to call [`Level::detect_possible_swaps`] again.

use std::fmt;
use std::path::Path;

use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::error::LevelError;
use crate::geometry::{self, Coord, Direction};
use crate::grid::Grid;
use crate::layout::LevelLayout;
use crate::pieces::{Piece, PieceType, SpriteId, Tile};
use crate::swaps::Swap;

/// Board width of the reference layout.
pub const NUM_COLUMNS: usize = 9;

/// Board height of the reference layout.
pub const NUM_ROWS: usize = 9;

/// Attempt limit used by callers of [`Level::try_initial_set`] that have no
/// better value.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000;

/// A level with the reference 9x9 dimensions.
pub type StandardLevel = Level<NUM_COLUMNS, NUM_ROWS>;

/// A `COLUMNS` x `ROWS` board.
///
/// The tile grid is fixed at construction; the piece grid changes during
/// play. Every stored piece's own position matches the cell it is stored in,
/// and pieces only sit on tiles.
#[derive(Debug, Clone)]
pub struct Level<const COLUMNS: usize, const ROWS: usize> {
    tiles: Grid<Tile, COLUMNS, ROWS>,
    pub(crate) pieces: Grid<Piece, COLUMNS, ROWS>,
    pub(crate) possible_swaps: FxHashSet<Swap>,
}

impl<const COLUMNS: usize, const ROWS: usize> Level<COLUMNS, ROWS> {
    /// A level where every cell is a hole.
    pub fn empty() -> Self {
        Self {
            tiles: Grid::new(),
            pieces: Grid::new(),
            possible_swaps: FxHashSet::default(),
        }
    }

    /// A level where every cell is open.
    pub fn full() -> Self {
        Self::with_open_cells([[true; ROWS]; COLUMNS])
    }

    /// Builds a level from a column-major open-cell mask (`[column][row]`).
    pub fn with_open_cells(open: [[bool; ROWS]; COLUMNS]) -> Self {
        let mut level = Self::empty();
        for (column, cells) in open.iter().enumerate() {
            for (row, &is_open) in cells.iter().enumerate() {
                if is_open {
                    level.tiles.set(column, row, Some(Tile));
                }
            }
        }
        level
    }

    /// Builds a level from a parsed layout, checking its dimensions.
    pub fn from_layout(layout: &LevelLayout) -> Result<Self, LevelError> {
        Ok(Self::with_open_cells(layout.open_cells::<COLUMNS, ROWS>()?))
    }

    /// Loads a level from a layout file.
    pub fn try_from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        Self::from_layout(&LevelLayout::load(path)?)
    }

    /// Loads a level from a layout file, falling back to an all-holes level.
    ///
    /// A level without tiles is unusable, so callers check
    /// [`Level::has_tiles`] to detect a failed load.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_from_file(path).unwrap_or_else(|err| {
            warn!("Failed to load level {}: {}", path.display(), err);
            Self::empty()
        })
    }

    pub const fn columns(&self) -> usize {
        COLUMNS
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    /// Whether at least one cell is open.
    pub fn has_tiles(&self) -> bool {
        self.tiles.iter().next().is_some()
    }

    pub fn open_tile_count(&self) -> usize {
        self.tiles.iter().count()
    }

    /// Returns the tile at a cell, or `None` for a hole.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board.
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.get(column, row).copied()
    }

    /// Returns the piece at a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board.
    pub fn piece_at(&self, column: usize, row: usize) -> Option<Piece> {
        self.pieces.get(column, row).copied()
    }

    #[inline]
    pub(crate) fn kind_at(&self, column: usize, row: usize) -> Option<PieceType> {
        self.pieces.get(column, row).map(Piece::kind)
    }

    /// All pieces currently on the board.
    pub fn pieces(&self) -> FxHashSet<Piece> {
        self.pieces.iter().map(|(_, piece)| *piece).collect()
    }

    /// Attaches a presentation handle to the piece at a cell.
    ///
    /// Returns `false` if the cell holds no piece.
    pub fn set_sprite(&mut self, column: usize, row: usize, sprite: SpriteId) -> bool {
        match self.pieces.get_mut(column, row) {
            Some(piece) => {
                piece.set_sprite(Some(sprite));
                true
            }
            None => false,
        }
    }

    /// Exchanges the contents of two cells and updates the moved pieces'
    /// positions to match.
    pub(crate) fn exchange(&mut self, a: Coord, b: Coord) {
        self.pieces.swap(a, b);
        for coord in [a, b] {
            if let Some(piece) = self.pieces.get_mut(coord.0, coord.1) {
                piece.move_to(coord);
            }
        }
    }

    /// Exchanges the two pieces of a swap.
    ///
    /// The swap is not checked for legality, and neither chains nor the
    /// legal-swap set are recomputed. Applying the same swap twice restores
    /// the original arrangement.
    pub fn perform_swap(&mut self, swap: &Swap) {
        self.exchange(swap.from().coord(), swap.to().coord());
    }

    /// Builds a swap between two cells if they are on the board, adjacent and
    /// both occupied.
    pub fn propose_swap(&self, from: Coord, to: Coord) -> Option<Swap> {
        let on_board = |(column, row): Coord| column < COLUMNS && row < ROWS;
        if !on_board(from) || !on_board(to) || !geometry::are_adjacent(from, to) {
            return None;
        }
        let first = self.piece_at(from.0, from.1)?;
        let second = self.piece_at(to.0, to.1)?;
        Some(Swap::new(first, second))
    }

    /// Builds a swap between a cell and its neighbor in `direction`.
    pub fn swap_toward(&self, from: Coord, direction: Direction) -> Option<Swap> {
        let to = geometry::step(from, direction, COLUMNS, ROWS)?;
        self.propose_swap(from, to)
    }

    /// Fills every open cell with a fresh piece, leaving no chain on the board.
    ///
    /// Cells are filled column by column, bottom to top, and a kind is
    /// redrawn whenever it would complete a run with the two pieces already
    /// placed to its left or below it.
    pub fn generate_initial_arrangement<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> FxHashSet<Piece> {
        self.pieces.clear();
        let mut placed = FxHashSet::default();

        for column in 0..COLUMNS {
            for row in 0..ROWS {
                if self.tiles.get(column, row).is_none() {
                    continue;
                }

                let kind = loop {
                    let kind = PieceType::random(rng);
                    if !self.completes_run_behind(column, row, kind) {
                        break kind;
                    }
                };

                let piece = Piece::new(column, row, kind);
                self.pieces.set(column, row, Some(piece));
                placed.insert(piece);
            }
        }

        placed
    }

    /// Whether `kind` at a cell would match the two cells to its left or the
    /// two cells below it.
    fn completes_run_behind(&self, column: usize, row: usize, kind: PieceType) -> bool {
        let horizontal = column >= 2
            && self.kind_at(column - 1, row) == Some(kind)
            && self.kind_at(column - 2, row) == Some(kind);
        let vertical = row >= 2
            && self.kind_at(column, row - 1) == Some(kind)
            && self.kind_at(column, row - 2) == Some(kind);
        horizontal || vertical
    }

    /// Regenerates the arrangement until at least one legal swap exists.
    ///
    /// Leaves the legal-swap set populated. This loop has no attempt limit:
    /// a layout that can never offer a legal swap (for example one without
    /// open tiles) never returns. Use [`Level::try_initial_set`] when the
    /// layout is not trusted.
    pub fn initial_set<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FxHashSet<Piece> {
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let placed = self.generate_initial_arrangement(rng);
            if !self.detect_possible_swaps().is_empty() {
                debug!(attempts, "generated playable arrangement");
                return placed;
            }
            debug!(attempts, "arrangement has no legal swaps, regenerating");
        }
    }

    /// Like [`Level::initial_set`], but gives up after `max_attempts`
    /// arrangements.
    pub fn try_initial_set<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<FxHashSet<Piece>, LevelError> {
        if !self.has_tiles() {
            return Err(LevelError::NoOpenTiles);
        }

        for attempt in 1..=max_attempts {
            let placed = self.generate_initial_arrangement(rng);
            if !self.detect_possible_swaps().is_empty() {
                debug!(attempts = attempt, "generated playable arrangement");
                return Ok(placed);
            }
        }

        warn!(max_attempts, "no playable arrangement found");
        Err(LevelError::Unplayable {
            attempts: max_attempts,
        })
    }
}

impl<const COLUMNS: usize, const ROWS: usize> Default for Level<COLUMNS, ROWS> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Renders the board top row first: `#` for holes, `.` for empty tiles and
/// the kind's symbol for pieces.
impl<const COLUMNS: usize, const ROWS: usize> fmt::Display for Level<COLUMNS, ROWS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for column in 0..COLUMNS {
                let symbol = match (self.tile_at(column, row), self.piece_at(column, row)) {
                    (None, _) => '#',
                    (Some(_), None) => '.',
                    (Some(_), Some(piece)) => piece.kind().symbol(),
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
