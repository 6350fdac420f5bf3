//! The enum table model: families of labelled integer constants.

use crate::error::{EnumgenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Integer width backing the generated newtypes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntRepr {
    U8,
    U16,
    #[default]
    U32,
    U64,
}

impl IntRepr {
    /// Largest value representable in this width.
    pub fn max_value(self) -> u64 {
        match self {
            IntRepr::U8 => u8::MAX as u64,
            IntRepr::U16 => u16::MAX as u64,
            IntRepr::U32 => u32::MAX as u64,
            IntRepr::U64 => u64::MAX,
        }
    }

    pub fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }

    /// Primitive type name as written in Rust source.
    pub fn type_name(self) -> &'static str {
        match self {
            IntRepr::U8 => "u8",
            IntRepr::U16 => "u16",
            IntRepr::U32 => "u32",
            IntRepr::U64 => "u64",
        }
    }
}

/// One labelled constant of a family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EnumMember {
    // Field order gives the derived Ord its (value, label) ordering.
    pub value: u64,
    pub label: String,
}

impl EnumMember {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// A named group of integer constants that becomes one generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumFamilySpec {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumFamilySpec {
    /// Builds a family, sorting members by value and then by label.
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = EnumMember>) -> Self {
        let mut members: Vec<EnumMember> = members.into_iter().collect();
        members.sort();
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in ascending `(value, label)` order.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members whose value was already taken by an earlier member.
    pub fn aliases(&self) -> impl Iterator<Item = (&EnumMember, &EnumMember)> {
        self.members
            .windows(2)
            .filter(|pair| pair[0].value == pair[1].value)
            .map(|pair| (&pair[0], &pair[1]))
    }
}

/// The whole input document: family name to family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumLibrary {
    families: BTreeMap<String, EnumFamilySpec>,
}

/// Shape of the JSON input before values are checked.
type RawDocument = BTreeMap<String, BTreeMap<String, serde_json::Number>>;

impl EnumLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses the JSON document at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading enum table from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|source| EnumgenError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Input file size: {} bytes", contents.len());

        Self::parse(&contents, path)
    }

    /// Parses a JSON document held in memory.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let raw: RawDocument =
            serde_json::from_str(contents).map_err(|source| EnumgenError::InputParse {
                path: PathBuf::from(path),
                source,
            })?;

        let mut library = Self::new();
        for (family, members) in raw {
            trace!("Loading family {} with {} members", family, members.len());
            let members = members
                .into_iter()
                .map(|(label, number)| {
                    let value = member_value(&family, &label, &number)?;
                    Ok(EnumMember { value, label })
                })
                .collect::<Result<Vec<_>>>()?;
            library.insert(EnumFamilySpec::new(family, members));
        }

        debug!(
            "Loaded {} families with {} members",
            library.len(),
            library.member_count()
        );
        Ok(library)
    }

    /// Adds a family, replacing any family with the same name.
    pub fn insert(&mut self, family: EnumFamilySpec) -> Option<EnumFamilySpec> {
        self.families.insert(family.name.clone(), family)
    }

    /// Convenience for building libraries in code.
    pub fn with_family<L: Into<String>>(
        mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (L, u64)>,
    ) -> Self {
        let members = members
            .into_iter()
            .map(|(label, value)| EnumMember::new(label, value));
        self.insert(EnumFamilySpec::new(name, members));
        self
    }

    pub fn get(&self, name: &str) -> Option<&EnumFamilySpec> {
        self.families.get(name)
    }

    /// Families in lexicographic name order.
    pub fn families(&self) -> impl Iterator<Item = &EnumFamilySpec> {
        self.families.values()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.families.values().map(EnumFamilySpec::len).sum()
    }
}

/// Checks that a JSON number is a non-negative integer that fits in `u64`.
fn member_value(family: &str, label: &str, number: &serde_json::Number) -> Result<u64> {
    if let Some(value) = number.as_u64() {
        return Ok(value);
    }

    let out_of_range = || EnumgenError::OutOfRange {
        family: family.to_string(),
        label: label.to_string(),
        value: number.to_string(),
        repr: IntRepr::U64,
    };

    if number.is_i64() {
        return Err(out_of_range());
    }

    // Integers beyond u64 are decoded as floats.
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() >= u64::MAX as f64 => {
            Err(out_of_range())
        }
        Some(float) if float.fract() == 0.0 && float < 0.0 => Err(out_of_range()),
        _ => Err(EnumgenError::NotAnInteger {
            family: family.to_string(),
            label: label.to_string(),
            value: number.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_sorts_families_and_members() {
        let library = EnumLibrary::from_json_str(
            r#"{"Zeta": {"b": 2, "a": 1}, "Alpha": {"Blue": 2, "Red": 0, "Green": 1}}"#,
        )
        .unwrap();

        let names: Vec<&str> = library.families().map(EnumFamilySpec::name).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);

        let alpha = library.get("Alpha").unwrap();
        let labels: Vec<&str> = alpha.members().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Red", "Green", "Blue"]);
        assert_eq!(library.member_count(), 5);
    }

    #[test]
    fn test_equal_values_are_ordered_by_label() {
        let family = EnumFamilySpec::new(
            "Kind",
            vec![
                EnumMember::new("Zulu", 1),
                EnumMember::new("Alpha", 1),
                EnumMember::new("First", 0),
            ],
        );
        let labels: Vec<&str> = family.members().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["First", "Alpha", "Zulu"]);

        let aliases: Vec<(&str, &str)> = family
            .aliases()
            .map(|(a, b)| (a.label.as_str(), b.label.as_str()))
            .collect();
        assert_eq!(aliases, vec![("Alpha", "Zulu")]);
    }

    #[test]
    fn test_parse_rejects_non_object_document() {
        let err = EnumLibrary::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, EnumgenError::InputParse { .. }));
    }

    #[test]
    fn test_parse_rejects_negative_value() {
        let err = EnumLibrary::from_json_str(r#"{"Color": {"Red": -1}}"#).unwrap_err();
        match err {
            EnumgenError::OutOfRange { family, label, .. } => {
                assert_eq!(family, "Color");
                assert_eq!(label, "Red");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_value_beyond_u64() {
        let err =
            EnumLibrary::from_json_str(r#"{"Color": {"Red": 100000000000000000000}}"#).unwrap_err();
        assert!(matches!(err, EnumgenError::OutOfRange { .. }));
    }

    #[test]
    fn test_parse_rejects_fractional_value() {
        let err = EnumLibrary::from_json_str(r#"{"Color": {"Red": 1.5}}"#).unwrap_err();
        assert!(matches!(err, EnumgenError::NotAnInteger { .. }));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EnumLibrary::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, EnumgenError::InputRead { .. }));
    }

    #[test]
    fn test_int_repr_limits() {
        assert!(IntRepr::U8.fits(255));
        assert!(!IntRepr::U8.fits(256));
        assert!(IntRepr::U16.fits(0xFFFF));
        assert!(!IntRepr::U32.fits(u32::MAX as u64 + 1));
        assert!(IntRepr::U64.fits(u64::MAX));
        assert_eq!(IntRepr::default(), IntRepr::U32);
        assert_eq!(IntRepr::from_str("u16").unwrap(), IntRepr::U16);
        assert_eq!(IntRepr::U64.to_string(), "u64");
    }
}
