//! Groups consecutive data lines of a text stream into level blocks.

use std::io::{self, BufRead};

use crate::line_grammar::LineGrammar;

/// The rows of one level, still unexpanded, with the input line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBlock {
    /// 1-based line number of the block's first data line.
    pub line: usize,
    pub rows: Vec<String>,
}

/// Iterator over the level blocks of a line stream.
///
/// Lines are trimmed, then tested against a [`LineGrammar`]. A run of matching
/// lines forms a block; any other line (blank, comment, title...) or the end
/// of input closes it. Each physical line may carry several rows separated by
/// the row delimiter.
pub struct LevelBlocks<R> {
    lines: io::Lines<R>,
    grammar: LineGrammar,
    delimiter: char,
    line_no: usize,
}

impl<R: BufRead> LevelBlocks<R> {
    pub fn new(reader: R, delimiter: char) -> Self {
        Self {
            lines: reader.lines(),
            grammar: LineGrammar::default(),
            delimiter,
            line_no: 0,
        }
    }

    pub fn with_grammar(mut self, grammar: LineGrammar) -> Self {
        self.grammar = grammar;
        self
    }
}

impl<R: BufRead> Iterator for LevelBlocks<R> {
    type Item = io::Result<LevelBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = 0;
        let mut data = Vec::new();

        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            let line = line.trim();
            if self.grammar.matches(line) {
                if data.is_empty() {
                    start = self.line_no;
                }
                data.push(line.to_owned());
            } else if !data.is_empty() {
                break;
            }
        }

        if data.is_empty() {
            return None;
        }
        Some(Ok(LevelBlock {
            line: start,
            rows: split_rows(&data, self.delimiter),
        }))
    }
}

/// Split physical lines into logical rows on `delimiter`.
///
/// Empty pieces (doubled or trailing delimiters) are dropped.
pub fn split_rows(lines: &[String], delimiter: char) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split(delimiter))
        .filter(|row| !row.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(input: &str) -> Vec<LevelBlock> {
        LevelBlocks::new(input.as_bytes(), '|')
            .collect::<io::Result<Vec<_>>>()
            .expect("read blocks")
    }

    #[test]
    fn separated_by_blank_and_comment_lines() {
        let input = "; level 1\n#####\n#@$.#\n#####\n\n; level 2\n###\n#@#\n###\n";
        let found = blocks(input);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].rows, vec!["#####", "#@$.#", "#####"]);
        assert_eq!(found[1].line, 7);
        assert_eq!(found[1].rows, vec!["###", "#@#", "###"]);
    }

    #[test]
    fn block_closed_by_end_of_input() {
        let found = blocks("####\n#@.#\n####");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rows.len(), 3);
    }

    #[test]
    fn lines_are_trimmed() {
        let found = blocks("  ####  \r\n\t#@.#\n####\n");
        assert_eq!(found[0].rows, vec!["####", "#@.#", "####"]);
    }

    #[test]
    fn rows_split_on_delimiter() {
        let found = blocks("5#|#@$.#||5#|\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rows, vec!["5#", "#@$.#", "5#"]);
    }

    #[test]
    fn no_data() {
        assert!(blocks("Title: nothing here\n\n; only comments\n").is_empty());
        assert!(blocks("").is_empty());
    }

    #[test]
    fn split_rows_drops_empty_pieces() {
        let lines = vec!["a|b".to_string(), "c||d|".to_string()];
        assert_eq!(split_rows(&lines, '|'), vec!["a", "b", "c", "d"]);
    }
}
