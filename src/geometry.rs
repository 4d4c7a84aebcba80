//! Board coordinates and the four swipe directions.
//!
//! Columns grow to the right and rows grow upward: `(0, 0)` is the
//! bottom-left cell of the board.

/// A `(column, row)` cell position.
pub type Coord = (usize, usize);

/// One step along a board axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Column and row deltas for a single step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }

    /// Direction of the dominant axis of a drag from `from` to `to`.
    ///
    /// Horizontal movement wins over vertical movement. Returns `None` when
    /// both cells are the same.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        if to.0 < from.0 {
            Some(Self::Left)
        } else if to.0 > from.0 {
            Some(Self::Right)
        } else if to.1 < from.1 {
            Some(Self::Down)
        } else if to.1 > from.1 {
            Some(Self::Up)
        } else {
            None
        }
    }
}

/// Steps one cell from `coord`, returning `None` if that leaves the
/// `columns` x `rows` board.
pub fn step(coord: Coord, direction: Direction, columns: usize, rows: usize) -> Option<Coord> {
    let (dc, dr) = direction.delta();
    let column = coord.0.checked_add_signed(dc)?;
    let row = coord.1.checked_add_signed(dr)?;
    (column < columns && row < rows).then_some((column, row))
}

/// Two cells are adjacent when they differ by one along exactly one axis.
pub fn are_adjacent(a: Coord, b: Coord) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}
