use serde::Serialize;
use std::fmt;

use crate::tile::Tile;

/// Column/row coordinate inside a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A rectangular level: `rows * cols` tiles in row-major order plus the
/// player's start square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub cols: u8,
    pub rows: u8,
    pub tiles: Vec<Tile>,
    pub player: Position,
}

impl Grid {
    /// Number of tiles a fully rectangular grid holds.
    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Tiles of row `row`, or `None` if out of range.
    pub fn row(&self, row: u8) -> Option<&[Tile]> {
        if row >= self.rows {
            return None;
        }
        let cols = self.cols as usize;
        let start = row as usize * cols;
        self.tiles.get(start..start + cols)
    }

    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        if pos.col >= self.cols {
            return None;
        }
        self.row(pos.row)?.get(pos.col as usize).copied()
    }
}

/// Renders the grid in standard Sokoban notation, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            let Some(tiles) = self.row(row) else {
                return Err(fmt::Error);
            };
            for (col, tile) in tiles.iter().enumerate() {
                let here = Position::new(col as u8, row);
                let glyph = match tile.player_glyph() {
                    Some(g) if here == self.player => g,
                    _ => tile.glyph(),
                };
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}
