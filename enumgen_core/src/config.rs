use crate::error::{EnumgenError, Result};
use crate::format::{FormatterKind, OnFormatError};
use crate::types::IntRepr;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

/// Name of the configuration file searched for by [`EnumgenConfig::new`].
pub const CONFIG_FILE_NAME: &str = "enumgen.toml";

static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .expect("Invalid regex for environment variable substitution")
});

/// The `[generate]` table of `enumgen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// JSON enum table to read.
    pub input_path: String,
    /// Rust file to write.
    pub output_path: String,
    /// Integer width of the generated types.
    pub repr: IntRepr,
    pub formatter: FormatterKind,
    pub on_format_error: OnFormatError,
    /// When false, two labels sharing a value in one family is an error.
    pub allow_duplicate_values: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            input_path: "enums.json".to_string(),
            output_path: "enums.rs".to_string(),
            repr: IntRepr::default(),
            formatter: FormatterKind::default(),
            on_format_error: OnFormatError::default(),
            allow_duplicate_values: true,
        }
    }
}

/// Root of `enumgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumgenConfig {
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl EnumgenConfig {
    /// Load configuration by searching for `enumgen.toml` in the current
    /// directory and its ancestors. Without one, defaults relative to the
    /// current directory are used.
    pub fn new() -> Result<EnumgenConfig> {
        info!("Loading enumgen configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let current_dir = env::current_dir().map_err(|e| {
            EnumgenError::config(format!("cannot determine current directory: {e}"))
        })?;
        match Self::find_config_file(&current_dir) {
            Some(config_path) => {
                info!("Found configuration file at: {:?}", config_path);
                Self::from_path(&config_path)
            }
            None => {
                info!(
                    "No {} found, using defaults in {:?}",
                    CONFIG_FILE_NAME, current_dir
                );
                Ok(EnumgenConfig {
                    generate: GenerateConfig::default(),
                    base_dir: current_dir,
                })
            }
        }
    }

    /// Load a specific configuration file.
    pub fn from_path(config_path: &Path) -> Result<EnumgenConfig> {
        let contents = fs::read_to_string(config_path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            EnumgenError::config(format!("failed to read {}: {e}", config_path.display()))
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let config = Self::from_toml_str(&contents, base_dir)?;

        info!("Configuration loaded successfully");
        debug!(
            "Input: {}, output: {}, repr: {}, formatter: {}",
            config.generate.input_path,
            config.generate.output_path,
            config.generate.repr,
            config.generate.formatter
        );
        Ok(config)
    }

    /// Parse configuration text, resolving paths against `base_dir`.
    pub fn from_toml_str(contents: &str, base_dir: impl Into<PathBuf>) -> Result<EnumgenConfig> {
        let mut config: EnumgenConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            EnumgenError::from(e)
        })?;
        config.base_dir = base_dir.into();

        debug!("Substituting environment variables in configuration");
        config.generate.input_path = Self::substitute_env_vars(&config.generate.input_path)?;
        config.generate.output_path = Self::substitute_env_vars(&config.generate.output_path)?;

        Ok(config)
    }

    /// Absolute (or base-relative) path of the input table.
    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.generate.input_path)
    }

    /// Absolute (or base-relative) path of the generated file.
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.generate.output_path)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Searches for `enumgen.toml` starting from `start` and traversing up to
    /// the root.
    pub fn find_config_file(start: &Path) -> Option<PathBuf> {
        debug!("Starting config file search from: {:?}", start);
        for path in start.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
        None
    }

    /// Substitute environment variables in config strings.
    /// Supports `${VAR_NAME}` and `${VAR_NAME:-default}`.
    fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        for cap in ENV_VAR_PATTERN.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(EnumgenError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}
