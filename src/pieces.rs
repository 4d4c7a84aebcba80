//! Piece kinds, tiles and the positioned pieces that sit on them.

use std::fmt;
use std::hash::{Hash, Hasher};

use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::geometry::Coord;

/// Kind of a piece.
///
/// `Unknown` is the unset value: it is never drawn by [`PieceType::random`]
/// and never placed on a live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceType {
    #[default]
    Unknown,
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

impl PieceType {
    /// The kinds that can be placed on a board.
    pub const PLAYABLE: [Self; 6] = [
        Self::Croissant,
        Self::Cupcake,
        Self::Danish,
        Self::Donut,
        Self::Macaroon,
        Self::SugarCookie,
    ];

    /// Draws a playable kind uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.gen()
    }

    pub fn is_playable(self) -> bool {
        self != Self::Unknown
    }

    /// Display name, also used by the presentation layer as its asset key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Croissant => "Croissant",
            Self::Cupcake => "Cupcake",
            Self::Danish => "Danish",
            Self::Donut => "Donut",
            Self::Macaroon => "Macaroon",
            Self::SugarCookie => "SugarCookie",
        }
    }

    /// Single-character tag for text rendering.
    pub fn symbol(self) -> char {
        match self {
            Self::Unknown => '?',
            Self::Croissant => 'C',
            Self::Cupcake => 'U',
            Self::Danish => 'D',
            Self::Donut => 'O',
            Self::Macaroon => 'M',
            Self::SugarCookie => 'S',
        }
    }
}

impl Distribution<PieceType> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceType {
        PieceType::PLAYABLE[rng.gen_range(0..PieceType::PLAYABLE.len())]
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marks a cell as part of the playable board. Cells without a tile are holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile;

/// Opaque handle to the presentation object drawn for a piece.
///
/// The board stores it and moves it along with the piece but never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u64);

/// A typed piece occupying one open cell.
///
/// Equality and hashing only look at the position, so a set of pieces holds
/// at most one piece per cell regardless of kind.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    column: usize,
    row: usize,
    kind: PieceType,
    sprite: Option<SpriteId>,
}

impl Piece {
    pub fn new(column: usize, row: usize, kind: PieceType) -> Self {
        Self {
            column,
            row,
            kind,
            sprite: None,
        }
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        (self.column, self.row)
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn sprite(&self) -> Option<SpriteId> {
        self.sprite
    }

    /// Moves the piece. Only the level calls this, together with the grid update.
    pub(crate) fn move_to(&mut self, (column, row): Coord) {
        self.column = column;
        self.row = row;
    }

    pub(crate) fn set_sprite(&mut self, sprite: Option<SpriteId>) {
        self.sprite = sprite;
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.coord() == other.coord()
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord().hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {} Square: [{}, {}]",
            self.kind, self.column, self.row
        )
    }
}
