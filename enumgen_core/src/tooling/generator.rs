//! Enum file generation for build-time usage.

use super::BuildConfig;
use crate::codegen::{self, GenerateOptions};
use crate::enumgen_log;
use crate::error::{EnumgenError, Result};
use crate::format::{self, Canonicalize, Canonicalized, OnFormatError};
use crate::types::EnumLibrary;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Report of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// The path where the file was written.
    pub output_path: PathBuf,
    /// The number of bytes written.
    pub bytes_written: usize,
    /// Number of enum families generated.
    pub families: usize,
    /// Number of members across all families.
    pub members: usize,
    /// Name of the formatter that ran.
    pub formatter: &'static str,
    /// True when the formatter failed and unformatted text was written.
    pub fell_back_to_raw: bool,
}

/// Reads an enum table and writes the generated Rust file.
pub struct EnumFileGenerator {
    config: BuildConfig,
    formatter: Box<dyn Canonicalize>,
}

impl EnumFileGenerator {
    /// Creates a generator using the formatter named by `config`.
    pub fn new(config: BuildConfig) -> Self {
        let formatter = config.formatter.formatter();
        Self { config, formatter }
    }

    /// Replaces the configured formatter.
    pub fn with_formatter(mut self, formatter: Box<dyn Canonicalize>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Runs load, generate, format and write.
    pub fn generate(&self) -> Result<GenerationReport> {
        info!("Starting enum generation");
        let library = EnumLibrary::from_path(&self.config.input_path)?;

        let rendered = render(
            &library,
            &self.config.generate_options(),
            self.formatter.as_ref(),
            self.config.on_format_error,
        )?;

        info!("Writing {:?}", self.config.output_path);
        write_output(&self.config.output_path, &rendered.text)?;

        let report = GenerationReport {
            output_path: self.config.output_path.clone(),
            bytes_written: rendered.text.len(),
            families: library.len(),
            members: library.member_count(),
            formatter: self.formatter.name(),
            fell_back_to_raw: rendered.fell_back,
        };
        info!(
            "Generation complete. Wrote {} families ({} bytes) to {:?}",
            report.families, report.bytes_written, report.output_path
        );
        Ok(report)
    }
}

/// Generates and formats `library`, writing the result to `writer`.
///
/// Formatter failures are returned rather than falling back. Returns the
/// number of bytes written.
pub fn generate_to_writer(
    library: &EnumLibrary,
    options: &GenerateOptions,
    formatter: &dyn Canonicalize,
    mut writer: impl Write,
) -> Result<usize> {
    let rendered = render(library, options, formatter, OnFormatError::Fail)?;
    writer
        .write_all(rendered.text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|source| EnumgenError::OutputWrite {
            path: PathBuf::from("<writer>"),
            source,
        })?;
    Ok(rendered.text.len())
}

fn render(
    library: &EnumLibrary,
    options: &GenerateOptions,
    formatter: &dyn Canonicalize,
    policy: OnFormatError,
) -> Result<Canonicalized> {
    let source = codegen::generate(library, options)?;
    enumgen_log!(&source, "raw_enums.rs");

    debug!("Formatting with {}", formatter.name());
    format::canonicalize(formatter, &source, policy)
}

/// Writes the whole text in one call, creating the parent directory first.
fn write_output(path: &Path, text: &str) -> Result<()> {
    let to_write_error = |source| EnumgenError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, text).map_err(to_write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::format::{FormatterKind, MockCanonicalize, PassThrough};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const COLOR_TABLE: &str = r#"{"Color": {"Red": 0, "Green": 1, "Blue": 2}}"#;

    fn config_in(dir: &TempDir) -> BuildConfig {
        let input = dir.path().join("enums.json");
        fs::write(&input, COLOR_TABLE).unwrap();
        BuildConfig::builder()
            .input_path(input)
            .output_path(dir.path().join("src/generated/enums.rs"))
            .formatter(FormatterKind::None)
            .build()
    }

    fn failing_formatter() -> Box<MockCanonicalize> {
        let mut formatter = MockCanonicalize::new();
        formatter.expect_name().return_const("mock");
        formatter
            .expect_canonicalize()
            .returning(|_| Err(EnumgenError::format("mock", "not installed")));
        Box::new(formatter)
    }

    #[test]
    fn test_generate_writes_file_and_reports() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let report = EnumFileGenerator::new(config.clone()).generate().unwrap();

        let written = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(report.output_path, config.output_path);
        assert_eq!(report.bytes_written, written.len());
        assert_eq!(report.families, 1);
        assert_eq!(report.members, 3);
        assert_eq!(report.formatter, "none");
        assert!(!report.fell_back_to_raw);
        assert!(written.starts_with(codegen::HEADER));
        syn::parse_file(&written).unwrap();
    }

    #[test]
    fn test_prettyplease_output() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig {
            formatter: FormatterKind::PrettyPlease,
            ..config_in(&dir)
        };
        EnumFileGenerator::new(config.clone()).generate().unwrap();
        let written = fs::read_to_string(&config.output_path).unwrap();
        assert!(written.contains("pub const Color_BLUE: Color = Color(0x2);\n"));
    }

    #[test]
    fn test_formatter_failure_falls_back_to_raw() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let report = EnumFileGenerator::new(config.clone())
            .with_formatter(failing_formatter())
            .generate()
            .unwrap();

        assert!(report.fell_back_to_raw);
        assert_eq!(report.formatter, "mock");
        let written = fs::read_to_string(&config.output_path).unwrap();
        syn::parse_file(&written).unwrap();
    }

    #[test]
    fn test_formatter_failure_with_fail_policy_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig {
            on_format_error: OnFormatError::Fail,
            ..config_in(&dir)
        };
        let err = EnumFileGenerator::new(config.clone())
            .with_formatter(failing_formatter())
            .generate()
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Format);
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_missing_input_is_load_error() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::builder()
            .input_path(dir.path().join("missing.json"))
            .output_path(dir.path().join("enums.rs"))
            .build();
        let err = EnumFileGenerator::new(config).generate().unwrap_err();
        assert!(matches!(err, EnumgenError::InputRead { .. }));
        assert_eq!(err.stage(), Stage::Load);
    }

    #[test]
    fn test_invalid_table_is_generate_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("enums.json");
        fs::write(&input, r#"{"Status": {"!!!": 1}}"#).unwrap();
        let config = BuildConfig::builder()
            .input_path(input)
            .output_path(dir.path().join("enums.rs"))
            .formatter(FormatterKind::None)
            .build();
        let err = EnumFileGenerator::new(config).generate().unwrap_err();
        assert_eq!(err.stage(), Stage::Generate);
    }

    #[test]
    fn test_unwritable_output_is_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let config = BuildConfig {
            output_path: blocker.join("enums.rs"),
            ..config_in(&dir)
        };
        let err = EnumFileGenerator::new(config).generate().unwrap_err();
        assert!(matches!(err, EnumgenError::OutputWrite { .. }));
        assert_eq!(err.stage(), Stage::Write);
    }

    #[test]
    fn test_generate_to_writer() {
        let library = EnumLibrary::from_json_str(COLOR_TABLE).unwrap();
        let mut buffer = Vec::new();
        let written = generate_to_writer(
            &library,
            &GenerateOptions::default(),
            &PassThrough,
            &mut buffer,
        )
        .unwrap();

        assert_eq!(written, buffer.len());
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, codegen::generate(&library, &GenerateOptions::default()).unwrap());
    }

    #[test]
    fn test_generate_to_writer_propagates_formatter_errors() {
        let library = EnumLibrary::from_json_str(COLOR_TABLE).unwrap();
        let formatter = failing_formatter();
        let mut buffer = Vec::new();
        let err = generate_to_writer(
            &library,
            &GenerateOptions::default(),
            formatter.as_ref(),
            &mut buffer,
        )
        .unwrap_err();
        assert!(matches!(err, EnumgenError::Format { .. }));
        assert!(buffer.is_empty());
    }
}
