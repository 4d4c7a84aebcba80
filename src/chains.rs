//! Chain detection over the whole board.
//!
//! Rows are scanned left to right and columns bottom to top. A run of three
//! or more pieces of one kind becomes one chain covering the whole run.
//! Horizontal and vertical runs are found independently, so an L or T shape
//! yields two chains that share a piece.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::geometry::Coord;
use crate::level::Level;
use crate::pieces::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Horizontal,
    Vertical,
}

/// A run of same-kind pieces along one axis.
///
/// Two chains are equal when they cover the same cells.
#[derive(Debug, Clone)]
pub struct Chain {
    kind: ChainKind,
    pieces: Vec<Piece>,
}

impl Chain {
    pub fn new(kind: ChainKind) -> Self {
        Self {
            kind,
            pieces: Vec::new(),
        }
    }

    pub fn add(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    /// Member pieces in scan order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.pieces.iter().any(|piece| piece.coord() == coord)
    }

    fn cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self.pieces.iter().map(Piece::coord).collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.cells() == other.cells()
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells().hash(state);
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} chain of {}:", self.kind, self.pieces.len())?;
        for piece in &self.pieces {
            write!(f, " ({}, {})", piece.column(), piece.row())?;
        }
        if let Some(first) = self.pieces.first() {
            write!(f, " {}", first.kind())?;
        }
        Ok(())
    }
}

impl<const COLUMNS: usize, const ROWS: usize> Level<COLUMNS, ROWS> {
    /// Finds every horizontal and vertical chain on the board.
    pub fn detect_all_chains(&self) -> FxHashSet<Chain> {
        let mut chains = self.detect_horizontal_chains();
        chains.extend(self.detect_vertical_chains());
        chains
    }

    fn detect_horizontal_chains(&self) -> FxHashSet<Chain> {
        let mut chains = FxHashSet::default();

        for row in 0..ROWS {
            let mut column = 0;
            while column + 2 < COLUMNS {
                let Some(kind) = self.kind_at(column, row) else {
                    column += 1;
                    continue;
                };

                if self.kind_at(column + 1, row) != Some(kind)
                    || self.kind_at(column + 2, row) != Some(kind)
                {
                    column += 1;
                    continue;
                }

                let mut chain = Chain::new(ChainKind::Horizontal);
                while column < COLUMNS {
                    match self.piece_at(column, row) {
                        Some(piece) if piece.kind() == kind => chain.add(piece),
                        _ => break,
                    }
                    column += 1;
                }
                trace!(%chain, "horizontal chain");
                chains.insert(chain);
            }
        }

        chains
    }

    fn detect_vertical_chains(&self) -> FxHashSet<Chain> {
        let mut chains = FxHashSet::default();

        for column in 0..COLUMNS {
            let mut row = 0;
            while row + 2 < ROWS {
                let Some(kind) = self.kind_at(column, row) else {
                    row += 1;
                    continue;
                };

                if self.kind_at(column, row + 1) != Some(kind)
                    || self.kind_at(column, row + 2) != Some(kind)
                {
                    row += 1;
                    continue;
                }

                let mut chain = Chain::new(ChainKind::Vertical);
                while row < ROWS {
                    match self.piece_at(column, row) {
                        Some(piece) if piece.kind() == kind => chain.add(piece),
                        _ => break,
                    }
                    row += 1;
                }
                trace!(%chain, "vertical chain");
                chains.insert(chain);
            }
        }

        chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::tests::level_from_rows;
    use crate::level::StandardLevel;

    #[test]
    fn test_empty_board_has_no_chains() {
        assert!(StandardLevel::full().detect_all_chains().is_empty());
        assert!(StandardLevel::empty().detect_all_chains().is_empty());
    }

    #[test]
    fn test_non_matching_board_has_no_chains() {
        let level = level_from_rows::<4, 4>(["CUDO", "UDOC", "DOCU", "OCUD"]);
        assert!(level.detect_all_chains().is_empty());
    }

    #[test]
    fn test_run_of_five_is_one_horizontal_chain() {
        let level = level_from_rows::<5, 3>(["CUDOM", "SSSSS", "UDOMC"]);
        let chains = level.detect_all_chains();
        assert_eq!(chains.len(), 1);

        let chain = chains.iter().next().unwrap();
        assert_eq!(chain.kind(), ChainKind::Horizontal);
        assert_eq!(chain.len(), 5);
        let columns: Vec<usize> = chain.pieces().iter().map(Piece::column).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 4]);
        assert!(chain.pieces().iter().all(|piece| piece.row() == 1));
    }

    #[test]
    fn test_vertical_run_at_board_edge() {
        let level = level_from_rows::<3, 4>(["CUM", "DOM", "COM", "DUM"]);
        let chains = level.detect_all_chains();
        assert_eq!(chains.len(), 1);
        let chain = chains.iter().next().unwrap();
        assert_eq!(chain.kind(), ChainKind::Vertical);
        assert_eq!(chain.len(), 4);
        assert!((0..4).all(|row| chain.contains((2, row))));
    }

    #[test]
    fn test_l_shape_yields_two_chains() {
        let level = level_from_rows::<4, 3>(["DCUO", "DUCO", "DDDU"]);
        let chains = level.detect_all_chains();
        assert_eq!(chains.len(), 2);

        let horizontal = chains
            .iter()
            .find(|chain| chain.kind() == ChainKind::Horizontal)
            .unwrap();
        let vertical = chains
            .iter()
            .find(|chain| chain.kind() == ChainKind::Vertical)
            .unwrap();
        assert_eq!(horizontal.len(), 3);
        assert_eq!(vertical.len(), 3);
        assert!(horizontal.contains((0, 0)) && vertical.contains((0, 0)));
    }

    #[test]
    fn test_runs_split_by_other_kind_or_gap() {
        let level = level_from_rows::<7, 1>(["CCCUCCC"]);
        assert_eq!(level.detect_all_chains().len(), 2);

        let level = level_from_rows::<7, 1>(["CC.CC#C"]);
        assert!(level.detect_all_chains().is_empty());
    }

    #[test]
    fn test_chain_equality_by_cells() {
        let mut first = Chain::new(ChainKind::Horizontal);
        let mut second = Chain::new(ChainKind::Horizontal);
        for column in 0..3 {
            first.add(Piece::new(column, 0, crate::pieces::PieceType::Donut));
            second.add(Piece::new(2 - column, 0, crate::pieces::PieceType::Donut));
        }
        assert_eq!(first, second);

        let chains: FxHashSet<Chain> = [first, second].into_iter().collect();
        assert_eq!(chains.len(), 1);
    }

    #[test]
    fn test_chain_display() {
        let level = level_from_rows::<3, 1>(["OOO"]);
        let chain = level.detect_all_chains().into_iter().next().unwrap();
        assert_eq!(
            chain.to_string(),
            "Horizontal chain of 3: (0, 0) (1, 0) (2, 0) Donut"
        );
    }
}
