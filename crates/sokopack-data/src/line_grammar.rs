//! Declarative shape test deciding whether a text line is level data.

/// Set of characters allowed at one position of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Any,
    OneOf(&'static str),
}

impl CharClass {
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(set) => set.contains(c),
        }
    }
}

/// Allowed first, body and last characters of a line.
///
/// A one-character line is checked against `first` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineGrammar {
    pub first: CharClass,
    pub body: CharClass,
    pub last: CharClass,
}

/// Level rows start with a wall, a box on goal, or a repeat count.
/// Anything may follow; unknown glyphs are rejected later, not treated as
/// block separators.
pub const DATA_LINE: LineGrammar = LineGrammar {
    first: CharClass::OneOf("#B*123456789"),
    body: CharClass::Any,
    last: CharClass::Any,
};

impl LineGrammar {
    /// Test an already trimmed line. Empty lines never match.
    pub fn matches(&self, line: &str) -> bool {
        let mut chars = line.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !self.first.contains(first) {
            return false;
        }
        let Some(last) = chars.next_back() else {
            return true;
        };
        self.last.contains(last) && chars.all(|c| self.body.contains(c))
    }
}

impl Default for LineGrammar {
    fn default() -> Self {
        DATA_LINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_lines() {
        for line in ["#####", "#. @#", "B", "*##", "3#", "12(#-)", "#abc"] {
            assert!(DATA_LINE.matches(line), "{line:?} should be data");
        }
    }

    #[test]
    fn separator_lines() {
        for line in ["", "; Level 1", "Title: Microban", "0#", "@###", " ###", "$##"] {
            assert!(!DATA_LINE.matches(line), "{line:?} should not be data");
        }
    }

    #[test]
    fn body_and_last_constraints() {
        let grammar = LineGrammar {
            first: CharClass::OneOf("#"),
            body: CharClass::OneOf("#. "),
            last: CharClass::OneOf("#"),
        };
        assert!(grammar.matches("#"));
        assert!(grammar.matches("##"));
        assert!(grammar.matches("#. #"));
        assert!(!grammar.matches("#. "));
        assert!(!grammar.matches("#$ #"));
    }
}
