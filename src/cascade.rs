//! Clearing matched pieces and refilling the board.
//!
//! After a swap the caller removes the detected chains, lets the remaining
//! pieces fall into the emptied tiles and tops each column up with new
//! pieces. The moves are returned so the presentation layer can animate them.

use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::chains::Chain;
use crate::level::Level;
use crate::pieces::{Piece, PieceType};

impl<const COLUMNS: usize, const ROWS: usize> Level<COLUMNS, ROWS> {
    /// Empties a cell, returning the piece it held.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board.
    pub fn remove_piece(&mut self, column: usize, row: usize) -> Option<Piece> {
        self.pieces.take(column, row)
    }

    /// Puts a new piece on an open cell, replacing any piece already there.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board, is a hole, or `kind` is
    /// [`PieceType::Unknown`].
    pub fn place_piece(&mut self, column: usize, row: usize, kind: PieceType) -> Piece {
        assert!(
            self.tile_at(column, row).is_some(),
            "cannot place a piece on the hole at ({}, {})",
            column,
            row
        );
        assert!(kind.is_playable(), "cannot place an unknown piece");

        let piece = Piece::new(column, row, kind);
        self.pieces.set(column, row, Some(piece));
        piece
    }

    /// Removes every piece that belongs to one of the chains.
    ///
    /// Returns the number of cells emptied; a piece shared by two chains is
    /// counted once.
    pub fn remove_chains(&mut self, chains: &FxHashSet<Chain>) -> usize {
        let mut removed = 0;
        for chain in chains {
            for piece in chain.pieces() {
                if self.pieces.take(piece.column(), piece.row()).is_some() {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Drops pieces into the empty tiles below them. Holes are skipped over.
    ///
    /// Returns, per column that changed, the moved pieces at their new
    /// positions, lowest first.
    pub fn fill_holes(&mut self) -> Vec<Vec<Piece>> {
        let mut columns = Vec::new();

        for column in 0..COLUMNS {
            let mut fallen = Vec::new();

            for row in 0..ROWS {
                if self.tile_at(column, row).is_none() || self.pieces.get(column, row).is_some() {
                    continue;
                }

                for lookup in row + 1..ROWS {
                    if let Some(mut piece) = self.pieces.take(column, lookup) {
                        piece.move_to((column, row));
                        self.pieces.set(column, row, Some(piece));
                        fallen.push(piece);
                        break;
                    }
                }
            }

            if !fallen.is_empty() {
                columns.push(fallen);
            }
        }

        columns
    }

    /// Fills the empty tiles at the top of each column with new pieces.
    ///
    /// A new piece never has the same kind as the one created just before
    /// it. Returns, per column that changed, the new pieces, highest first.
    pub fn top_up<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Vec<Piece>> {
        let mut columns = Vec::new();
        let mut previous = PieceType::Unknown;

        for column in 0..COLUMNS {
            let mut added = Vec::new();

            let mut row = ROWS;
            while row > 0 && self.pieces.get(column, row - 1).is_none() {
                row -= 1;
                if self.tile_at(column, row).is_none() {
                    continue;
                }

                let kind = loop {
                    let kind = PieceType::random(rng);
                    if kind != previous {
                        break kind;
                    }
                };
                previous = kind;
                added.push(self.place_piece(column, row, kind));
            }

            if !added.is_empty() {
                columns.push(added);
            }
        }

        columns
    }

    /// Removes chains and refills the board until no chain is left.
    ///
    /// Returns the chains removed in each round. The legal-swap set is not
    /// recomputed.
    pub fn resolve_chains<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<FxHashSet<Chain>> {
        let mut rounds = Vec::new();
        loop {
            let chains = self.detect_all_chains();
            if chains.is_empty() {
                break;
            }
            let removed = self.remove_chains(&chains);
            self.fill_holes();
            self.top_up(rng);
            debug!(round = rounds.len() + 1, removed, "resolved chains");
            rounds.push(chains);
        }
        rounds
    }
}
