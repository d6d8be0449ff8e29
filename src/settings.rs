//! Settings for the `sokopack` binary.
//!
//! `defaults/sokopack.default.toml` is embedded into the binary; a user file
//! and command-line overrides are layered on top via [`Loader`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use sokopack_data::CompileOptions;
use sokopack_types::{Limits, LimitsError};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/sokopack.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: LimitsSettings,
    pub syntax: SyntaxSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsSettings {
    pub min_rows: usize,
    pub max_rows: usize,
    pub max_cols: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxSettings {
    pub row_delimiter: char,
    pub max_line_len: usize,
}

impl Settings {
    /// Validated pipeline options for these settings.
    pub fn compile_options(&self, verify: bool) -> Result<CompileOptions, LimitsError> {
        let limits = Limits {
            min_rows: self.limits.min_rows,
            max_rows: self.limits.max_rows,
            max_cols: self.limits.max_cols,
        }
        .validate()?;
        Ok(CompileOptions {
            limits,
            row_delimiter: self.syntax.row_delimiter,
            max_line_len: self.syntax.max_line_len,
            verify,
        })
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
