use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

/// Canonical cell kinds of a packed level.
///
/// The player is not a tile: its start square is stored as a coordinate and
/// the cell underneath it is encoded as [`Tile::Floor`] or [`Tile::Goal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum Tile {
    Floor = 0,
    Wall = 1,
    Box = 2,
    Goal = 3,
    BoxOnGoal = 4,
}

/// A tile's codeword, right-aligned in `bits`, `len` bits long, sent MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCode {
    pub bits: u8,
    pub len: u32,
}

impl TileCode {
    /// True if `self` is a prefix of `other` (or equal to it).
    pub const fn is_prefix_of(self, other: TileCode) -> bool {
        self.len <= other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl Tile {
    /// Longest codeword in the tile table.
    pub const MAX_CODE_LEN: u32 = 3;

    /// Prefix-free code used by the run-length bitstream.
    pub const fn code(self) -> TileCode {
        match self {
            Self::Floor => TileCode { bits: 0b00, len: 2 },
            Self::Wall => TileCode { bits: 0b01, len: 2 },
            Self::Box => TileCode { bits: 0b10, len: 2 },
            Self::Goal => TileCode { bits: 0b110, len: 3 },
            Self::BoxOnGoal => TileCode { bits: 0b111, len: 3 },
        }
    }

    /// Canonical text glyph, as written in standard Sokoban files.
    pub const fn glyph(self) -> char {
        match self {
            Self::Floor => ' ',
            Self::Wall => '#',
            Self::Box => '$',
            Self::Goal => '.',
            Self::BoxOnGoal => '*',
        }
    }

    /// Glyph for the player standing on this tile, if the player may stand here.
    pub const fn player_glyph(self) -> Option<char> {
        match self {
            Self::Floor => Some('@'),
            Self::Goal => Some('+'),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn count() {
        assert_eq!(Tile::COUNT, 5);
    }

    #[test]
    fn codes() {
        assert_eq!(Tile::Floor.code(), TileCode { bits: 0b00, len: 2 });
        assert_eq!(Tile::Wall.code(), TileCode { bits: 0b01, len: 2 });
        assert_eq!(Tile::Box.code(), TileCode { bits: 0b10, len: 2 });
        assert_eq!(Tile::Goal.code(), TileCode { bits: 0b110, len: 3 });
        assert_eq!(Tile::BoxOnGoal.code(), TileCode { bits: 0b111, len: 3 });
    }

    #[test]
    fn codes_are_prefix_free() {
        for a in Tile::iter() {
            for b in Tile::iter() {
                if a != b {
                    assert!(
                        !a.code().is_prefix_of(b.code()),
                        "{a:?} code is a prefix of {b:?} code"
                    );
                }
            }
        }
    }

    #[test]
    fn longest_code() {
        let longest = Tile::iter().map(|t| t.code().len).max();
        assert_eq!(longest, Some(Tile::MAX_CODE_LEN));
    }

    #[test]
    fn player_only_on_floor_or_goal() {
        let standable: Vec<Tile> = Tile::iter()
            .filter(|t| t.player_glyph().is_some())
            .collect();
        assert_eq!(standable, vec![Tile::Floor, Tile::Goal]);
    }

    #[test]
    fn round_trip() {
        for t in Tile::iter() {
            assert_eq!(Tile::from_repr(t as u8), Some(t));
        }
    }
}
