//! Grid assembly and tile classification.
//!
//! [`assemble`] expands the macros of a level block, checks its size against
//! the target's limits and pads it into a rectangle of raw glyphs.
//! [`classify`] then maps each glyph onto a [`Tile`] and locates the player.

use sokopack_types::{FILLER, Glyph, Grid, Limits, Position, Tile};

use crate::macros::{self, MacroError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("too few rows: {rows} (at least {min} required)")]
    TooFewRows { rows: usize, min: usize },
    #[error("too many rows: {rows} (at most {max} allowed)")]
    TooManyRows { rows: usize, max: usize },
    #[error("too many columns: {cols} (at most {max} allowed)")]
    TooManyColumns { cols: usize, max: usize },
    #[error("unrecognized glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("no player start position")]
    NoPlayer,
    #[error("second player start at {second}, first one at {first}")]
    MultiplePlayers { first: Position, second: Position },
    #[error(transparent)]
    Macro(#[from] MacroError),
}

/// A padded rectangle of raw glyphs in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGrid {
    pub cols: u8,
    pub rows: u8,
    pub glyphs: Vec<char>,
}

/// Expand, size-check and pad the rows of one level block.
pub fn assemble(
    rows: &[String],
    limits: &Limits,
    max_line_len: usize,
) -> Result<RawGrid, LevelError> {
    let rows = rows
        .iter()
        .map(|row| macros::expand(row, max_line_len))
        .collect::<Result<Vec<_>, _>>()?;

    let height = rows.len();
    if height < limits.min_rows {
        return Err(LevelError::TooFewRows {
            rows: height,
            min: limits.min_rows,
        });
    }
    let too_many_rows = LevelError::TooManyRows {
        rows: height,
        max: limits.max_rows,
    };
    if height > limits.max_rows {
        return Err(too_many_rows);
    }

    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let too_many_cols = LevelError::TooManyColumns {
        cols: width,
        max: limits.max_cols,
    };
    if width > limits.max_cols {
        return Err(too_many_cols);
    }

    let mut glyphs = Vec::with_capacity(width * height);
    for row in &rows {
        let start = glyphs.len();
        glyphs.extend(row.chars());
        glyphs.resize(start + width, FILLER);
    }

    let raw = RawGrid {
        cols: u8::try_from(width).map_err(|_| too_many_cols)?,
        rows: u8::try_from(height).map_err(|_| too_many_rows)?,
        glyphs,
    };
    log::info!("rows: {}, columns: {}", raw.rows, raw.cols);
    Ok(raw)
}

/// Map every glyph onto its canonical tile and record the player's start.
///
/// The player's position is taken from the row-major index using the column
/// count: `col = index % cols`, `row = index / cols`.
pub fn classify(raw: &RawGrid) -> Result<Grid, LevelError> {
    let cols = raw.cols as usize;
    let mut tiles: Vec<Tile> = Vec::with_capacity(raw.glyphs.len());
    let mut player: Option<Position> = None;

    for (index, &c) in raw.glyphs.iter().enumerate() {
        let (row, col) = (index / cols, index % cols);
        let glyph = Glyph::classify(c).ok_or(LevelError::UnknownGlyph { glyph: c, row, col })?;
        if glyph.player {
            let here = Position::new(col as u8, row as u8);
            if let Some(first) = player {
                return Err(LevelError::MultiplePlayers {
                    first,
                    second: here,
                });
            }
            player = Some(here);
        }
        tiles.push(glyph.tile);
    }

    Ok(Grid {
        cols: raw.cols,
        rows: raw.rows,
        tiles,
        player: player.ok_or(LevelError::NoPlayer)?,
    })
}

/// [`assemble`] followed by [`classify`].
pub fn build(rows: &[String], limits: &Limits, max_line_len: usize) -> Result<Grid, LevelError> {
    classify(&assemble(rows, limits, max_line_len)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_LINE: usize = 4096;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pads_short_rows_with_floor() {
        let raw = assemble(&rows(&["####", "#@", "###"]), &Limits::default(), MAX_LINE)
            .expect("assemble");
        assert_eq!((raw.cols, raw.rows), (4, 3));
        assert_eq!(raw.glyphs.iter().collect::<String>(), "#####@  ### ");
    }

    #[test]
    fn expands_macros_before_measuring() {
        let raw = assemble(&rows(&["6#", "#@2 $#", "6#"]), &Limits::default(), MAX_LINE)
            .expect("assemble");
        assert_eq!(raw.cols, 6);
        assert_eq!(raw.glyphs.iter().collect::<String>(), "#######@  $#######");
    }

    #[test]
    fn too_few_rows() {
        let err = assemble(&rows(&["#####", "#@.$#"]), &Limits::default(), MAX_LINE).unwrap_err();
        assert_eq!(err, LevelError::TooFewRows { rows: 2, min: 3 });
    }

    #[test]
    fn too_many_rows() {
        let block = vec!["#@#".to_string(); 39];
        let err = assemble(&block, &Limits::default(), MAX_LINE).unwrap_err();
        assert_eq!(err, LevelError::TooManyRows { rows: 39, max: 38 });
    }

    #[test]
    fn too_many_columns() {
        let err = assemble(&rows(&["49#", "#@", "#"]), &Limits::default(), MAX_LINE).unwrap_err();
        assert_eq!(err, LevelError::TooManyColumns { cols: 49, max: 48 });
    }

    #[test]
    fn limits_are_inclusive() {
        let block = vec!["48#".to_string(); 38];
        let raw = assemble(&block, &Limits::default(), MAX_LINE).expect("assemble");
        assert_eq!((raw.cols, raw.rows), (48, 38));
    }

    #[test]
    fn classifies_scenario_level() {
        let grid = build(&rows(&["#####", "#. @#", "#####"]), &Limits::default(), MAX_LINE)
            .expect("build");
        assert_eq!((grid.cols, grid.rows), (5, 3));
        assert_eq!(grid.player, Position::new(3, 1));
        assert_eq!(grid.tile_at(grid.player), Some(Tile::Floor));
        assert_eq!(grid.tile_at(Position::new(1, 1)), Some(Tile::Goal));
        assert_eq!(grid.tiles.len(), 15);
    }

    #[test]
    fn player_position_uses_column_count() {
        // 6 columns, 3 rows: index 10 is column 4 of row 1.
        let grid = build(&rows(&["######", "#   +#", "######"]), &Limits::default(), MAX_LINE)
            .expect("build");
        assert_eq!(grid.player, Position::new(4, 1));
        assert_eq!(grid.tile_at(grid.player), Some(Tile::Goal));
    }

    #[test]
    fn aliases() {
        let grid = build(&rows(&["#####", "#pbB#", "#-_.#", "#####"]), &Limits::default(), MAX_LINE)
            .expect("build");
        assert_eq!(
            grid.row(1),
            Some(&[Tile::Wall, Tile::Floor, Tile::Box, Tile::BoxOnGoal, Tile::Wall][..])
        );
        assert_eq!(
            grid.row(2),
            Some(&[Tile::Wall, Tile::Floor, Tile::Floor, Tile::Goal, Tile::Wall][..])
        );
    }

    #[test]
    fn unknown_glyph() {
        let err = build(&rows(&["####", "#@x#", "####"]), &Limits::default(), MAX_LINE).unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownGlyph {
                glyph: 'x',
                row: 1,
                col: 2
            }
        );
    }

    #[test]
    fn no_player() {
        let err = build(&rows(&["####", "#$.#", "####"]), &Limits::default(), MAX_LINE).unwrap_err();
        assert_eq!(err, LevelError::NoPlayer);
    }

    #[test]
    fn two_players() {
        let err = build(&rows(&["####", "#@+#", "####"]), &Limits::default(), MAX_LINE).unwrap_err();
        assert_eq!(
            err,
            LevelError::MultiplePlayers {
                first: Position::new(1, 1),
                second: Position::new(2, 1)
            }
        );
    }

    #[test]
    fn macro_failure_propagates() {
        let err = assemble(&rows(&["9#", "#@#", "###"]), &Limits::default(), 8).unwrap_err();
        assert_eq!(err, LevelError::Macro(MacroError::TooLong { max_len: 8 }));
    }
}
