//! Match-3 Board Engine
//!
//! Generates starting arrangements for a fixed board of open tiles, finds
//! the swaps that produce a match, applies them and detects the resulting
//! chains. Rendering and input decoding are left to the caller, which feeds
//! board coordinates in and reads piece, tile and chain queries out.

pub mod cascade;
pub mod chains;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod level;
pub mod pieces;
pub mod swaps;

pub use chains::{Chain, ChainKind};
pub use error::LevelError;
pub use geometry::{Coord, Direction};
pub use layout::LevelLayout;
pub use level::{Level, StandardLevel, DEFAULT_MAX_ATTEMPTS, NUM_COLUMNS, NUM_ROWS};
pub use pieces::{Piece, PieceType, SpriteId, Tile};
pub use swaps::Swap;
