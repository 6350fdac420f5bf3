//! Build-time configuration for enum generation.

use crate::codegen::GenerateOptions;
use crate::config::EnumgenConfig;
use crate::error::EnumgenError;
use crate::format::{FormatterKind, OnFormatError};
use crate::types::IntRepr;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// JSON enum table to read.
    pub input_path: PathBuf,

    /// Rust file to write.
    pub output_path: PathBuf,

    /// Integer width of the generated types.
    pub repr: IntRepr,

    /// Formatter applied to the generated text.
    pub formatter: FormatterKind,

    /// What to do when the formatter fails.
    pub on_format_error: OnFormatError,

    /// Whether two labels of one family may share a value.
    pub allow_duplicate_values: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("enums.json"),
            output_path: PathBuf::from("enums.rs"),
            repr: IntRepr::default(),
            formatter: FormatterKind::default(),
            on_format_error: OnFormatError::default(),
            allow_duplicate_values: true,
        }
    }
}

impl BuildConfig {
    /// Creates a new BuildConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from enumgen.toml.
    ///
    /// Searches for enumgen.toml starting from `CARGO_MANIFEST_DIR` (if set)
    /// or the current directory, walking upward to the filesystem root.
    /// Without a config file the defaults are resolved against the start
    /// directory.
    pub fn from_toml() -> Result<Self, EnumgenError> {
        let start_dir = match env::var("CARGO_MANIFEST_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir().map_err(|e| {
                EnumgenError::config(format!("cannot determine current directory: {e}"))
            })?,
        };

        Self::from_toml_search(&start_dir)
    }

    /// Loads configuration from a specific enumgen.toml file.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, EnumgenError> {
        let config = EnumgenConfig::from_path(path.as_ref())?;
        Ok(Self::from_config(&config))
    }

    /// Searches for enumgen.toml starting from the given directory.
    pub fn from_toml_search(start_dir: &Path) -> Result<Self, EnumgenError> {
        dotenv::dotenv().ok();
        match EnumgenConfig::find_config_file(start_dir) {
            Some(config_path) => Self::from_toml_path(config_path),
            None => Ok(Self::from_config(&EnumgenConfig {
                base_dir: start_dir.to_path_buf(),
                ..EnumgenConfig::default()
            })),
        }
    }

    /// Converts a loaded configuration file, resolving its relative paths.
    pub fn from_config(config: &EnumgenConfig) -> Self {
        let generate = &config.generate;
        Self {
            input_path: config.input_path(),
            output_path: config.output_path(),
            repr: generate.repr,
            formatter: generate.formatter,
            on_format_error: generate.on_format_error,
            allow_duplicate_values: generate.allow_duplicate_values,
        }
    }

    /// Options passed on to the code generator.
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions::builder()
            .repr(self.repr)
            .allow_duplicate_values(self.allow_duplicate_values)
            .build()
    }

    /// Creates a builder for programmatic configuration.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::new()
    }
}

/// Builder for creating BuildConfig programmatically.
#[derive(Debug, Clone, Default)]
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: BuildConfig::default(),
        }
    }

    /// Sets the JSON table to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// Sets the file to write.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn repr(mut self, repr: IntRepr) -> Self {
        self.config.repr = repr;
        self
    }

    pub fn formatter(mut self, formatter: FormatterKind) -> Self {
        self.config.formatter = formatter;
        self
    }

    pub fn on_format_error(mut self, policy: OnFormatError) -> Self {
        self.config.on_format_error = policy;
        self
    }

    /// Rejects tables where two labels of one family share a value.
    pub fn deny_duplicate_values(mut self) -> Self {
        self.config.allow_duplicate_values = false;
        self
    }

    /// Builds the final BuildConfig.
    pub fn build(self) -> BuildConfig {
        self.config
    }
}
