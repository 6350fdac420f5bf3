//! Build-time tooling for generating enum source files.
//!
//! ## Quick Start (in build.rs)
//!
//! ```rust,ignore
//! fn main() {
//!     enumgen_core::tooling::generate().expect("Enum generation failed");
//!     println!("cargo:rerun-if-changed=enums.json");
//!     println!("cargo:rerun-if-changed=enumgen.toml");
//! }
//! ```

mod build_config;
mod generator;

pub use build_config::*;
pub use generator::*;

use crate::error::EnumgenError;

/// Generates the enum file using configuration from enumgen.toml.
///
/// Reads configuration from `enumgen.toml` (searching from
/// `CARGO_MANIFEST_DIR` upward, falling back to defaults) and writes the
/// configured output file.
///
/// # Errors
///
/// Returns `EnumgenError` if:
/// - Configuration file cannot be parsed
/// - The enum table cannot be read or is invalid
/// - Formatting fails under the `fail` policy
/// - The output file cannot be written
pub fn generate() -> Result<GenerationReport, EnumgenError> {
    let config = BuildConfig::from_toml()?;
    EnumFileGenerator::new(config).generate()
}

/// Generates the enum file with a custom configuration.
pub fn generate_with_config(config: BuildConfig) -> Result<GenerationReport, EnumgenError> {
    EnumFileGenerator::new(config).generate()
}
