//! Canonicalization of generated source text.
//!
//! Formatting is cosmetic: the unformatted output of [`crate::codegen`] is
//! already valid Rust. A [`Canonicalize`] implementation turns it into
//! readable text; [`canonicalize`] applies the configured failure policy.

use crate::error::{EnumgenError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// A post-processing step applied to generated source.
#[cfg_attr(test, mockall::automock)]
pub trait Canonicalize {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn canonicalize(&self, source: &str) -> Result<String>;
}

/// Leaves the text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Canonicalize for PassThrough {
    fn name(&self) -> &'static str {
        "none"
    }

    fn canonicalize(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Pipes the text through an external `rustfmt` process.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    program: PathBuf,
    edition: String,
}

impl Default for Rustfmt {
    fn default() -> Self {
        // Honour the toolchain's RUSTFMT override like cargo does.
        let program = std::env::var_os("RUSTFMT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("rustfmt"));
        Self {
            program,
            edition: "2021".to_string(),
        }
    }
}

impl Rustfmt {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = edition.into();
        self
    }
}

impl Canonicalize for Rustfmt {
    fn name(&self) -> &'static str {
        "rustfmt"
    }

    fn canonicalize(&self, source: &str) -> Result<String> {
        debug!("Running {:?} --edition {}", self.program, self.edition);

        let mut child = Command::new(&self.program)
            .arg("--edition")
            .arg(&self.edition)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                EnumgenError::format(self.name(), format!("failed to start {:?}: {e}", self.program))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EnumgenError::format(self.name(), "stdin was not captured"))?;
        let input = source.to_string();
        // Feed stdin from another thread so a full stdout pipe cannot deadlock us.
        let feeder = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| EnumgenError::format(self.name(), e.to_string()))?;
        feeder
            .join()
            .map_err(|_| EnumgenError::format(self.name(), "stdin writer panicked"))?
            .map_err(|e| EnumgenError::format(self.name(), format!("failed to write stdin: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EnumgenError::format(
                self.name(),
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let formatted = String::from_utf8(output.stdout)
            .map_err(|e| EnumgenError::format(self.name(), e.to_string()))?;
        if formatted.trim().is_empty() && !source.trim().is_empty() {
            return Err(EnumgenError::format(self.name(), "produced no output"));
        }
        Ok(formatted)
    }
}

/// Formats in-process with `prettyplease`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPlease;

impl Canonicalize for PrettyPlease {
    fn name(&self) -> &'static str {
        "prettyplease"
    }

    fn canonicalize(&self, source: &str) -> Result<String> {
        let file = syn::parse_file(source)
            .map_err(|e| EnumgenError::format(self.name(), e.to_string()))?;

        // Line comments are not part of the syntax tree; keep the leading ones.
        let header: String = source
            .lines()
            .take_while(|line| line.starts_with("//") && !line.starts_with("///"))
            .map(|line| format!("{line}\n"))
            .collect();
        let separator = if header.is_empty() { "" } else { "\n" };

        Ok(format!("{header}{separator}{}", prettyplease::unparse(&file)))
    }
}

/// Which formatter a run uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormatterKind {
    None,
    #[default]
    Rustfmt,
    PrettyPlease,
}

impl FormatterKind {
    pub fn formatter(self) -> Box<dyn Canonicalize> {
        match self {
            FormatterKind::None => Box::new(PassThrough),
            FormatterKind::Rustfmt => Box::new(Rustfmt::default()),
            FormatterKind::PrettyPlease => Box::new(PrettyPlease),
        }
    }
}

/// What to do when the formatter fails.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OnFormatError {
    /// Keep the unformatted text.
    #[default]
    Raw,
    /// Abort the run.
    Fail,
}

/// Result of a canonicalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonicalized {
    pub text: String,
    /// True when the formatter failed and the raw text was kept.
    pub fell_back: bool,
}

/// Runs `formatter` over `source`, applying `policy` when it fails.
pub fn canonicalize(
    formatter: &dyn Canonicalize,
    source: &str,
    policy: OnFormatError,
) -> Result<Canonicalized> {
    match formatter.canonicalize(source) {
        Ok(text) => Ok(Canonicalized {
            text,
            fell_back: false,
        }),
        Err(err) if policy == OnFormatError::Raw => {
            warn!(
                "Formatter {} failed, writing unformatted source: {}",
                formatter.name(),
                err
            );
            Ok(Canonicalized {
                text: source.to_string(),
                fell_back: true,
            })
        }
        Err(err) => Err(err),
    }
}
