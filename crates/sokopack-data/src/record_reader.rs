//! Reader for packed level records, the inverse of [`crate::record`].
//!
//! Decoding stops after exactly `rows * cols` tiles; the zero pad that
//! follows the bitstream is skipped, never interpreted.

use bitstream_io::{BigEndian, BitRead, BitReader};
use sokopack_types::{Grid, Position, Tile};

use crate::record::LENGTH_PREFIX;
use crate::rle::RUN_LEN_BITS;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },
    #[error("run of {len} tiles at tile {at} overruns a grid of {area} tiles")]
    RunOverflow { len: usize, at: usize, area: usize },
    #[error("record length {length} disagrees with {consumed} bytes decoded")]
    LengthMismatch { length: usize, consumed: usize },
    #[error("player start {player} lies outside the {cols}x{rows} grid")]
    PlayerOutOfRange { player: Position, cols: u8, rows: u8 },
}

/// Bit cursor over a record body, tracking its position for diagnostics.
struct Bits<'a> {
    reader: BitReader<&'a [u8], BigEndian>,
    pos: usize,
}

impl<'a> Bits<'a> {
    fn new(body: &'a [u8]) -> Self {
        Self {
            reader: BitReader::endian(body, BigEndian),
            pos: 0,
        }
    }

    /// Byte offset within the whole record.
    fn offset(&self) -> usize {
        LENGTH_PREFIX + self.pos / 8
    }

    fn read_bit(&mut self) -> Result<bool, DecodeError> {
        let bit = self
            .reader
            .read_bit()
            .map_err(|_| DecodeError::UnexpectedEof { offset: self.offset() })?;
        self.pos += 1;
        Ok(bit)
    }

    fn read_u8(&mut self, bits: u32) -> Result<u8, DecodeError> {
        let value = self
            .reader
            .read::<u8>(bits)
            .map_err(|_| DecodeError::UnexpectedEof { offset: self.offset() })?;
        self.pos += bits as usize;
        Ok(value)
    }

    fn byte_align(&mut self) {
        self.reader.byte_align();
        self.pos = self.pos.div_ceil(8) * 8;
    }

    fn bytes_consumed(&self) -> usize {
        self.pos.div_ceil(8)
    }
}

/// Decode one tile codeword (see [`Tile::code`]).
fn read_tile(bits: &mut Bits<'_>) -> Result<Tile, DecodeError> {
    let tile = if !bits.read_bit()? {
        if bits.read_bit()? { Tile::Wall } else { Tile::Floor }
    } else if !bits.read_bit()? {
        Tile::Box
    } else if bits.read_bit()? {
        Tile::BoxOnGoal
    } else {
        Tile::Goal
    };
    Ok(tile)
}

/// Decode the record at the start of `data`.
///
/// Returns the grid and the total number of bytes the record occupies,
/// length prefix included.
pub fn decode_record(data: &[u8]) -> Result<(Grid, usize), DecodeError> {
    let prefix = data
        .get(..LENGTH_PREFIX)
        .ok_or(DecodeError::UnexpectedEof { offset: data.len() })?;
    let length = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
    let body = data
        .get(LENGTH_PREFIX..LENGTH_PREFIX + length)
        .ok_or(DecodeError::UnexpectedEof { offset: data.len() })?;

    let mut bits = Bits::new(body);
    let cols = bits.read_u8(8)?;
    let rows = bits.read_u8(8)?;
    let area = cols as usize * rows as usize;

    let mut tiles = Vec::with_capacity(area);
    while tiles.len() < area {
        let len = if bits.read_bit()? {
            bits.read_u8(RUN_LEN_BITS)? as usize + 2
        } else {
            1
        };
        let tile = read_tile(&mut bits)?;
        if tiles.len() + len > area {
            return Err(DecodeError::RunOverflow {
                len,
                at: tiles.len(),
                area,
            });
        }
        tiles.extend(std::iter::repeat_n(tile, len));
    }

    bits.byte_align();
    let player = Position::new(bits.read_u8(8)?, bits.read_u8(8)?);
    if player.col >= cols || player.row >= rows {
        return Err(DecodeError::PlayerOutOfRange { player, cols, rows });
    }

    let consumed = bits.bytes_consumed();
    if consumed != length {
        return Err(DecodeError::LengthMismatch { length, consumed });
    }

    Ok((
        Grid {
            cols,
            rows,
            tiles,
            player,
        },
        LENGTH_PREFIX + length,
    ))
}

/// Iterator over back-to-back records in a buffer.
///
/// Stops after the first malformed record.
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next record.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<Grid, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        match decode_record(&self.data[self.pos..]) {
            Ok((grid, used)) => {
                self.pos += used;
                Some(Ok(grid))
            }
            Err(e) => {
                self.pos = self.data.len();
                Some(Err(e))
            }
        }
    }
}
