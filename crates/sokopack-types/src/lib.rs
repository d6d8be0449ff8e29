pub mod glyph;
pub mod grid;
pub mod limits;
pub mod tile;

pub use glyph::{FILLER, Glyph};
pub use grid::{Grid, Position};
pub use limits::{Limits, LimitsError};
pub use tile::{Tile, TileCode};
