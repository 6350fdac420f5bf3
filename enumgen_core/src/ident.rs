//! Identifier rules for generated items.

use crate::error::{EnumgenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("Invalid identifier regex"));

/// Names the generated preamble brings into scope. A family may not use them.
pub const RESERVED_NAMES: &[&str] = &[
    "EnumTextError",
    "fmt",
    "de",
    "Serialize",
    "Serializer",
    "Deserialize",
    "Deserializer",
];

/// Primitive types used by generated code; a struct of the same name would shadow them.
const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64",
    "i128", "isize", "f32", "f64",
];

/// Keywords reserved by newer editions that `syn` still parses as identifiers.
const EDITION_KEYWORDS: &[&str] = &["gen"];

/// Uppercases a label and strips everything outside `[A-Za-z0-9_]`.
///
/// `"In-Progress!"` becomes `"INPROGRESS"`, `"<random>"` becomes `"RANDOM"`.
pub fn sanitize_label(label: &str) -> String {
    NON_IDENT_CHARS
        .replace_all(&label.to_uppercase(), "")
        .into_owned()
}

/// Name of the constant generated for `label` in `family`.
pub fn constant_name(family: &str, label: &str) -> Result<String> {
    let sanitized = sanitize_label(label);
    if sanitized.is_empty() {
        return Err(EnumgenError::empty_identifier(family, label));
    }
    Ok(format!("{family}_{sanitized}"))
}

/// Checks that a family name can be emitted as a type name.
pub fn check_family_name(name: &str) -> Result<()> {
    if RESERVED_NAMES.contains(&name) || PRIMITIVE_TYPES.contains(&name) {
        return Err(EnumgenError::ReservedName(name.to_string()));
    }
    // syn rejects keywords and `_`; raw identifiers are not accepted either.
    if name.starts_with("r#")
        || EDITION_KEYWORDS.contains(&name)
        || syn::parse_str::<syn::Ident>(name).is_err()
    {
        return Err(EnumgenError::InvalidFamilyName(name.to_string()));
    }
    Ok(())
}
