//! Inline repetition shorthand used in hand-written level files.
//!
//! Two forms are rewritten, each repeatedly at its leftmost occurrence until
//! none is left: first the grouped form `3(ab)` → `ababab`, then the single
//! form `4#` → `####`. A group body never contains digits or `)`, so nested
//! groups such as `2(3(a))` resolve from the inside out. There is no escape:
//! a digit in front of anything is always a repeat count.

use std::ops::Range;

use winnow::ascii::digit1;
use winnow::combinator::delimited;
use winnow::token::{none_of, take_while};
use winnow::Parser;
use winnow::error::ModalResult;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MacroError {
    #[error("expanded row exceeds {max_len} characters")]
    TooLong { max_len: usize },
}

/// One parsed macro: `count` copies of `unit`.
#[derive(Debug, PartialEq, Eq)]
struct Repeat {
    count: usize,
    unit: String,
}

/// `<digits>(<chars>)`
fn group(input: &mut &str) -> ModalResult<Repeat> {
    (
        digit1.parse_to::<usize>(),
        delimited(
            '(',
            take_while(1.., |c: char| !c.is_ascii_digit() && c != ')'),
            ')',
        ),
    )
        .map(|(count, unit): (usize, &str)| Repeat {
            count,
            unit: unit.to_owned(),
        })
        .parse_next(input)
}

/// `<digits><char>`
fn single(input: &mut &str) -> ModalResult<Repeat> {
    (digit1.parse_to::<usize>(), none_of('0'..='9'))
        .map(|(count, c): (usize, char)| Repeat {
            count,
            unit: c.to_string(),
        })
        .parse_next(input)
}

/// Find the leftmost position where `parser` matches, like a regex search.
fn find_leftmost(
    line: &str,
    mut parser: impl FnMut(&mut &str) -> ModalResult<Repeat>,
) -> Option<(Range<usize>, Repeat)> {
    for (start, c) in line.char_indices() {
        if !c.is_ascii_digit() {
            continue;
        }
        let mut rest = &line[start..];
        if let Ok(repeat) = parser(&mut rest) {
            return Some((start..line.len() - rest.len(), repeat));
        }
    }
    None
}

fn expand_all(
    mut line: String,
    max_len: usize,
    mut parser: impl FnMut(&mut &str) -> ModalResult<Repeat>,
) -> Result<String, MacroError> {
    // Every rewrite removes at least one digit and inserts none, so this ends.
    while let Some((span, repeat)) = find_leftmost(&line, &mut parser) {
        let new_len = repeat
            .count
            .checked_mul(repeat.unit.len())
            .and_then(|n| n.checked_add(line.len() - span.len()))
            .filter(|&n| n <= max_len)
            .ok_or(MacroError::TooLong { max_len })?;

        let mut next = String::with_capacity(new_len);
        next.push_str(&line[..span.start]);
        next.push_str(&repeat.unit.repeat(repeat.count));
        next.push_str(&line[span.end..]);
        line = next;
    }
    Ok(line)
}

/// Expand every repetition macro in `line`.
///
/// Fails if the result would be longer than `max_len` bytes.
pub fn expand(line: &str, max_len: usize) -> Result<String, MacroError> {
    let line = expand_all(line.to_owned(), max_len, group)?;
    expand_all(line, max_len, single)
}
