//! Byte packing and record framing.
//!
//! Record layout, bits packed MSB first within each byte:
//!
//! ```text
//! offset  size  field
//! 0       2     length (u16, little-endian), bytes that follow
//! 2       1     cols
//! 3       1     rows
//! 4..     *     run-length bitstream, zero-padded to a byte boundary
//! ...     1     player column
//! ...     1     player row
//! ```
//!
//! Records are written back to back; the length prefix is the only delimiter.

use std::io::{self, Write};

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use sokopack_types::Grid;

use crate::rle;

/// Bytes taken by the length prefix.
pub const LENGTH_PREFIX: usize = 2;
/// Bytes taken by `cols` and `rows`.
pub const HEADER_LEN: usize = 2;
/// Bytes taken by the player coordinate.
pub const FOOTER_LEN: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("scanned {scanned} tiles, expected {expected}")]
    TileCountMismatch { scanned: usize, expected: usize },
    #[error("record body of {0} bytes does not fit the length field")]
    TooLong(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Pack `grid` into one complete, length-prefixed record.
pub fn encode_record(grid: &Grid) -> Result<Vec<u8>, EncodeError> {
    if grid.tiles.len() != grid.area() {
        return Err(EncodeError::TileCountMismatch {
            scanned: grid.tiles.len(),
            expected: grid.area(),
        });
    }

    let mut body = Vec::new();
    {
        let mut writer = BitWriter::endian(&mut body, BigEndian);
        writer.write(8, grid.cols)?;
        writer.write(8, grid.rows)?;
        for run in rle::runs(&grid.tiles) {
            log::trace!("run {:?} x{}", run.tile, run.len);
            rle::write_run(&mut writer, run)?;
        }
        writer.byte_align()?;
        writer.write(8, grid.player.col)?;
        writer.write(8, grid.player.row)?;
    }

    let length = u16::try_from(body.len()).map_err(|_| EncodeError::TooLong(body.len()))?;
    log::debug!(
        "{}x{} level packed into {} bytes ({} tiles)",
        grid.cols,
        grid.rows,
        body.len(),
        grid.tiles.len()
    );

    let mut record = Vec::with_capacity(LENGTH_PREFIX + body.len());
    record.extend_from_slice(&length.to_le_bytes());
    record.extend_from_slice(&body);
    Ok(record)
}

/// Output sink for records, counting what went through it.
pub struct RecordWriter<W> {
    inner: W,
    records: usize,
    bytes: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records: 0,
            bytes: 0,
        }
    }

    /// Append an already encoded record.
    pub fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        self.inner.write_all(record)?;
        self.records += 1;
        self.bytes += record.len() as u64;
        Ok(())
    }

    /// Encode `grid` and append it. Nothing is written if encoding fails.
    pub fn write_grid(&mut self, grid: &Grid) -> Result<usize, EncodeError> {
        let record = encode_record(grid)?;
        self.write_record(&record)?;
        Ok(record.len())
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
