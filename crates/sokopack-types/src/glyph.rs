use crate::tile::Tile;

/// Glyph used to right-pad short rows. Classifies as [`Tile::Floor`].
pub const FILLER: char = ' ';

/// Classification of one raw level glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub tile: Tile,
    /// Set when the glyph marks the player's start square.
    pub player: bool,
}

impl Glyph {
    const fn new(tile: Tile, player: bool) -> Self {
        Self { tile, player }
    }

    /// Map an input character onto its canonical tile.
    ///
    /// Both the standard Sokoban glyphs (`@+$*.`) and their letter and
    /// punctuation aliases are accepted. Returns `None` for anything else.
    pub const fn classify(c: char) -> Option<Glyph> {
        match c {
            '#' => Some(Self::new(Tile::Wall, false)),
            'p' | '@' => Some(Self::new(Tile::Floor, true)),
            'P' | '+' => Some(Self::new(Tile::Goal, true)),
            'b' | '$' => Some(Self::new(Tile::Box, false)),
            'B' | '*' => Some(Self::new(Tile::BoxOnGoal, false)),
            '.' => Some(Self::new(Tile::Goal, false)),
            ' ' | '-' | '_' => Some(Self::new(Tile::Floor, false)),
            _ => None,
        }
    }
}
