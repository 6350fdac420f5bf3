use crate::types::IntRepr;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumgenError {
    #[error("failed to read input {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input {path}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("value {value} of {family}.{label:?} is not an integer")]
    NotAnInteger {
        family: String,
        label: String,
        value: String,
    },

    #[error("value {value} of {family}.{label:?} does not fit in {repr}")]
    OutOfRange {
        family: String,
        label: String,
        value: String,
        repr: IntRepr,
    },

    #[error("invalid family name {0:?}: not a Rust identifier")]
    InvalidFamilyName(String),

    #[error("family name {0:?} is reserved by the generated preamble")]
    ReservedName(String),

    #[error("label {label:?} in {family} sanitizes to an empty identifier")]
    EmptyIdentifier { family: String, label: String },

    #[error("identifier {ident} is generated twice (from {first} and {second})")]
    DuplicateIdentifier {
        ident: String,
        first: String,
        second: String,
    },

    #[error("{family} assigns 0x{value:X} to both {first:?} and {second:?}")]
    DuplicateValue {
        family: String,
        value: u64,
        first: String,
        second: String,
    },

    #[error("formatter {formatter} failed: {message}")]
    Format { formatter: String, message: String },

    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

pub type Result<T> = std::result::Result<T, EnumgenError>;

/// Pipeline phase an error belongs to, used in the driver's diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Generate,
    Format,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Generate => "generate",
            Stage::Format => "format",
            Stage::Write => "write",
        })
    }
}

impl EnumgenError {
    pub fn stage(&self) -> Stage {
        match self {
            EnumgenError::Config(_) | EnumgenError::Toml(_) | EnumgenError::EnvVarNotSet(_) => {
                Stage::Config
            }
            EnumgenError::InputRead { .. }
            | EnumgenError::InputParse { .. }
            | EnumgenError::NotAnInteger { .. } => Stage::Load,
            EnumgenError::OutOfRange { .. }
            | EnumgenError::InvalidFamilyName(_)
            | EnumgenError::ReservedName(_)
            | EnumgenError::EmptyIdentifier { .. }
            | EnumgenError::DuplicateIdentifier { .. }
            | EnumgenError::DuplicateValue { .. } => Stage::Generate,
            EnumgenError::Format { .. } => Stage::Format,
            EnumgenError::OutputWrite { .. } => Stage::Write,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        EnumgenError::Config(message.into())
    }

    pub fn format(formatter: impl Into<String>, message: impl Into<String>) -> Self {
        EnumgenError::Format {
            formatter: formatter.into(),
            message: message.into(),
        }
    }

    pub fn empty_identifier(family: impl Into<String>, label: impl Into<String>) -> Self {
        EnumgenError::EmptyIdentifier {
            family: family.into(),
            label: label.into(),
        }
    }
}
