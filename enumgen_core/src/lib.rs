// enumgen - typed integer enums with lookup tables and JSON text, generated from a JSON table

pub mod codegen;
pub mod config;
pub mod error;
pub mod format;
pub mod ident;
pub mod log;
pub mod tooling;
pub mod types;
pub mod validate;

// Used by the `enumgen_log!` macro.
#[doc(hidden)]
pub use chrono;

// Re-export commonly used items for convenience
pub use codegen::{GenerateOptions, generate};
pub use config::EnumgenConfig;
pub use error::{EnumgenError, Result, Stage};
pub use format::{Canonicalize, FormatterKind, OnFormatError, PassThrough, PrettyPlease, Rustfmt};
pub use tooling::{BuildConfig, EnumFileGenerator, GenerationReport, generate_to_writer};
pub use types::{EnumFamilySpec, EnumLibrary, EnumMember, IntRepr};
