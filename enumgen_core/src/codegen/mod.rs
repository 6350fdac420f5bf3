//! Rust source generation for enum families.
//!
//! Every family in an [`EnumLibrary`] becomes a `#[repr(transparent)]`
//! newtype over the configured integer width, with:
//! - `NAMES` / `VALUES` lookup tables and `name` / `from_name` lookups
//! - one `<Family>_<LABEL>` constant per member
//! - `Display` rendering with a `<Family>_0x<HEX>` fallback for undeclared values
//! - JSON text conversion through `to_json` / `from_json` and serde impls
//!
//! The generator is a pure function of its inputs. Formatting and writing the
//! result are left to [`crate::format`] and [`crate::tooling`].

mod family;
mod preamble;

use crate::error::Result;
use crate::types::{EnumLibrary, IntRepr};
use crate::validate::validate;
use bon::Builder;
use proc_macro2::{Span, TokenStream};
use tracing::{debug, info};

pub use preamble::HEADER;

/// Options controlling the shape of the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GenerateOptions {
    /// Integer width of the generated newtypes.
    #[builder(default)]
    pub repr: IntRepr,
    /// Whether two labels of one family may share a value.
    #[builder(default = true)]
    pub allow_duplicate_values: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Validates `library` and renders it as unformatted Rust source.
pub fn generate(library: &EnumLibrary, options: &GenerateOptions) -> Result<String> {
    info!(
        family_count = library.len(),
        member_count = library.member_count(),
        repr = %options.repr,
        "Generating enum source"
    );

    validate(library, options)?;

    let tokens = generate_tokens(library, options);
    let output = format!("{HEADER}{tokens}\n");

    debug!(output_length = output.len(), "Enum source generation complete");
    Ok(output)
}

/// Token form of the generated file, without the header comment.
///
/// Callers are expected to have validated the library first; identifiers are
/// built with `format_ident!`, which panics on invalid names.
pub fn generate_tokens(library: &EnumLibrary, options: &GenerateOptions) -> TokenStream {
    let mut tokens = preamble::preamble_tokens();
    for family in library.families() {
        tokens.extend(family::family_tokens(family, options.repr));
    }
    tokens
}

/// Uppercase hexadecimal integer literal, e.g. `0x1F`.
pub(crate) fn hex_literal(value: u64) -> syn::LitInt {
    syn::LitInt::new(&format!("0x{value:X}"), Span::call_site())
}
