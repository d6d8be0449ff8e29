use serde::Serialize;

/// Size limits imposed by the playback target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limits {
    pub min_rows: usize,
    pub max_rows: usize,
    pub max_cols: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LimitsError {
    #[error("min_rows must be at least 1")]
    ZeroMinRows,
    #[error("min_rows {min} exceeds max_rows {max}")]
    Inverted { min: usize, max: usize },
    #[error("{name} {value} does not fit in a byte")]
    TooWide { name: &'static str, value: usize },
}

impl Limits {
    /// Screen limits of the PMD 85 player.
    pub const PMD85: Limits = Limits {
        min_rows: 3,
        max_rows: 38,
        max_cols: 48,
    };

    /// Check that the limits are usable: dimensions are written as single bytes.
    pub fn validate(self) -> Result<Self, LimitsError> {
        if self.min_rows == 0 {
            return Err(LimitsError::ZeroMinRows);
        }
        if self.min_rows > self.max_rows {
            return Err(LimitsError::Inverted {
                min: self.min_rows,
                max: self.max_rows,
            });
        }
        for (name, value) in [("max_rows", self.max_rows), ("max_cols", self.max_cols)] {
            if value > u8::MAX as usize {
                return Err(LimitsError::TooWide { name, value });
            }
        }
        Ok(self)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::PMD85
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Limits::default().validate(), Ok(Limits::PMD85));
    }

    #[test]
    fn rejects_oversized() {
        let limits = Limits {
            max_cols: 256,
            ..Limits::default()
        };
        assert_eq!(
            limits.validate(),
            Err(LimitsError::TooWide {
                name: "max_cols",
                value: 256
            })
        );
    }

    #[test]
    fn rejects_inverted() {
        let limits = Limits {
            min_rows: 10,
            max_rows: 5,
            ..Limits::default()
        };
        assert!(matches!(limits.validate(), Err(LimitsError::Inverted { .. })));
    }

    #[test]
    fn rejects_zero_min() {
        let limits = Limits {
            min_rows: 0,
            ..Limits::default()
        };
        assert_eq!(limits.validate(), Err(LimitsError::ZeroMinRows));
    }
}
