//! Run-length coding of a row-major tile sequence.
//!
//! A run is emitted as a length prefix followed by the tile's codeword:
//!
//! ```text
//!   length 1      0
//!   length 2..=9  1 LLL      LLL = length - 2, MSB first
//! ```
//!
//! Runs never exceed [`MAX_RUN`] tiles. The ninth identical tile closes its run
//! immediately, so ten walls in a row become a run of nine and a run of one.

use std::io;

use bitstream_io::BitWrite;
use sokopack_types::Tile;

pub const MAX_RUN: u8 = 9;

/// Bits of the length field that follows a `1` prefix.
pub const RUN_LEN_BITS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub tile: Tile,
    pub len: u8,
}

impl Run {
    pub const fn new(tile: Tile, len: u8) -> Self {
        Self { tile, len }
    }

    /// Size of the encoded run in bits.
    pub const fn bit_len(self) -> u32 {
        let prefix = if self.len == 1 { 1 } else { 1 + RUN_LEN_BITS };
        prefix + self.tile.code().len
    }
}

/// Split `tiles` into maximal runs of at most [`MAX_RUN`] identical tiles.
pub fn runs(tiles: &[Tile]) -> Vec<Run> {
    let mut out = Vec::new();
    let mut current: Option<Run> = None;

    for &tile in tiles {
        match current.as_mut() {
            Some(run) if run.tile == tile => {
                run.len += 1;
                if run.len == MAX_RUN {
                    out.push(*run);
                    current = None;
                }
            }
            _ => {
                out.extend(current.take());
                current = Some(Run::new(tile, 1));
            }
        }
    }
    out.extend(current);
    out
}

/// Write one run: length prefix, then the tile codeword.
pub fn write_run<W: BitWrite>(writer: &mut W, run: Run) -> io::Result<()> {
    debug_assert!((1..=MAX_RUN).contains(&run.len));
    if run.len == 1 {
        writer.write_bit(false)?;
    } else {
        writer.write_bit(true)?;
        writer.write(RUN_LEN_BITS, run.len - 2)?;
    }
    let code = run.tile.code();
    writer.write(code.len, code.bits)
}
