//! Text-to-binary compiler for Sokoban levels.
//!
//! Each level block of the input becomes one self-contained record; see
//! [`record`] for the byte layout and [`rle`] for the tile bitstream.

pub mod blocks;
pub mod grid;
pub mod line_grammar;
pub mod macros;
pub mod record;
pub mod record_reader;
pub mod rle;

use std::io::{self, BufRead, Write};

use sokopack_types::Limits;

use crate::blocks::LevelBlocks;
use crate::grid::LevelError;
use crate::record::{EncodeError, RecordWriter};
use crate::record_reader::DecodeError;

/// Knobs of the conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub limits: Limits,
    /// Separates several rows written on one input line.
    pub row_delimiter: char,
    /// Longest row allowed after macro expansion.
    pub max_line_len: usize,
    /// Decode each record after encoding it and check it reproduces the level.
    pub verify: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            row_delimiter: '|',
            max_line_len: 4096,
            verify: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("level at line {line} rejected")]
    Level {
        line: usize,
        #[source]
        source: LevelError,
    },
    #[error("level at line {line} could not be encoded")]
    Encode {
        line: usize,
        #[source]
        source: EncodeError,
    },
    #[error("record for level at line {line} does not decode")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },
    #[error("record for level at line {line} decodes to a different level")]
    VerifyMismatch { line: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Compile every level block read from `reader` into `writer`.
///
/// Blocks are handled one at a time: read, validated, encoded, written. The
/// first invalid block aborts the run; records of earlier blocks have already
/// been written, the offending block writes nothing. Returns the number of
/// records written.
pub fn compile_levels<R: BufRead, W: Write>(
    reader: R,
    writer: &mut RecordWriter<W>,
    options: &CompileOptions,
) -> Result<usize, CompileError> {
    let mut levels = 0;
    for block in LevelBlocks::new(reader, options.row_delimiter) {
        let block = block?;
        let line = block.line;
        log::debug!("level block at line {line}: {} rows", block.rows.len());

        let grid = grid::build(&block.rows, &options.limits, options.max_line_len)
            .map_err(|source| CompileError::Level { line, source })?;
        let record = record::encode_record(&grid)
            .map_err(|source| CompileError::Encode { line, source })?;

        if options.verify {
            let (decoded, _) = record_reader::decode_record(&record)
                .map_err(|source| CompileError::Decode { line, source })?;
            if decoded != grid {
                return Err(CompileError::VerifyMismatch { line });
            }
        }

        writer.write_record(&record)?;
        levels += 1;
    }
    Ok(levels)
}
