//! Settings for the parser and the tree printers
//!
//! The shipped `defaults/chalk.default.toml` is compiled in and always forms the
//! bottom layer. A [`Loader`] stacks TOML files and single-key overrides over it;
//! later layers win key by key.
//!
//! ```toml
//! [parser]
//! report_furthest_failure = true
//! max_depth = 512
//! ```

use crate::chalk::formats::OutputFormat;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/chalk.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ChalkConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

/// Engine settings, turned into [`ParseOptions`](crate::chalk::parser::ParseOptions).
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub report_furthest_failure: bool,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub truncate: usize,
}

/// Stack of configuration layers, bottom first.
#[derive(Debug, Clone)]
pub struct Loader {
    layers: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let shipped = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            layers: Config::builder().add_source(shipped),
        }
    }

    /// TOML file that must exist when [`build`](Self::build) runs.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.toml(path.as_ref(), true)
    }

    /// TOML file that is skipped when absent, such as a per-user settings file.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.toml(path.as_ref(), false)
    }

    /// Pin one dotted key (`output.format`, `parser.max_depth`) above every file.
    pub fn set_override<I>(self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        let layers = self.layers.set_override(key, value)?;
        Ok(Self { layers })
    }

    fn toml(self, path: &Path, required: bool) -> Self {
        tracing::trace!(path = %path.display(), required, "config layer");
        let file = File::from(path).format(FileFormat::Toml).required(required);
        Self {
            layers: self.layers.add_source(file),
        }
    }

    /// Merge the layers and check them against [`ChalkConfig`].
    pub fn build(self) -> Result<ChalkConfig, ConfigError> {
        let config: ChalkConfig = self.layers.build()?.try_deserialize()?;
        tracing::debug!(
            format = %config.output.format,
            max_depth = config.parser.max_depth,
            "configuration loaded"
        );
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Shipped settings with nothing layered on top.
pub fn load_defaults() -> Result<ChalkConfig, ConfigError> {
    Loader::new().build()
}
