//! Runtime behaviour of the generated enums.
//!
//! These tests verify that:
//! 1. Every declared label round-trips through the JSON text form
//! 2. Undeclared values render with the hex fallback
//! 3. Unknown labels and malformed text fail with the right error
//! 4. The generated types work as serde fields

use enumgen_playground::enums::*;
use enumgen_playground::{Criterion, Track};
use pretty_assertions::assert_eq;
use std::str::FromStr;

// ============================================================================
// Round Trips
// ============================================================================

macro_rules! assert_round_trips {
    ($($family:ident),* $(,)?) => {$(
        for &(value, label) in $family::NAMES {
            let parsed = $family::from_json(&format!("{label:?}"))
                .unwrap_or_else(|e| panic!("{} {label:?}: {e}", stringify!($family)));
            assert_eq!(parsed, value);
            assert_eq!(value.to_json(), serde_json::to_string(label).unwrap());
            assert_eq!(value.to_string(), label);
        }
        assert_eq!($family::NAMES.len(), $family::VALUES.len());
    )*};
}

#[test]
fn test_every_label_round_trips() {
    assert_round_trips!(
        Color,
        Conjunction,
        Field,
        ICloudStatus,
        LimitMethod,
        LocationStatus,
        LogicRule,
        LogicSign,
        LoveStatus,
        MediaKind,
        SelectionMethod,
        Status,
    );
}

#[test]
fn test_lookup_tables_are_in_value_order() {
    let values: Vec<u32> = MediaKind::NAMES.iter().map(|(v, _)| v.value()).collect();
    let mut sorted = values.clone();
    sorted.sort_unstable();
    assert_eq!(values, sorted);
    assert_eq!(Field::NAMES.len(), 45);
    assert_eq!(Field::NAMES[0], (Field_NAME, "name"));
    assert_eq!(Field::VALUES.last(), Some(&("love", Field_LOVE)));
}

// ============================================================================
// Color Scenario
// ============================================================================

#[test]
fn test_color_constants() {
    assert_eq!(Color_RED, Color(0x0));
    assert_eq!(Color_GREEN, Color(0x1));
    assert_eq!(Color_BLUE, Color(0x2));
    assert_eq!(Color_GREEN.to_string(), "Green");
    assert_eq!(Color_GREEN.to_json(), "\"Green\"");
    assert_eq!(Color::from_json("\"Blue\"").unwrap(), Color_BLUE);
}

#[test]
fn test_undeclared_value_uses_hex_fallback() {
    assert_eq!(Color(99).to_string(), "Color_0x63");
    assert_eq!(Color(255).to_string(), "Color_0xFF");
    assert_eq!(MediaKind(3).to_string(), "MediaKind_0x3");
    assert_eq!(Color(99).to_json(), "\"Color_0x63\"");
    assert_eq!(Color(99).name(), None);
}

#[test]
fn test_unknown_label_names_family_and_label() {
    let err = Color::from_json("\"Purple\"").unwrap_err();
    assert!(matches!(
        &err,
        EnumTextError::UnknownLabel { family: "Color", label } if label == "Purple"
    ));
    assert_eq!(err.family(), Some("Color"));
    assert_eq!(err.label(), Some("Purple"));
    assert_eq!(err.to_string(), "unknown Color Purple");
}

#[test]
fn test_malformed_text_is_rejected() {
    for text in ["42", "Green", "\"Green", "[\"Green\"]", "null"] {
        let err = Color::from_json(text).unwrap_err();
        assert!(
            matches!(err, EnumTextError::MalformedInput(_)),
            "{text:?} should be malformed"
        );
        assert_eq!(err.family(), None);
    }
}

#[test]
fn test_fallback_text_does_not_parse_back() {
    let err = Color::from_json("\"Color_0x63\"").unwrap_err();
    assert!(matches!(err, EnumTextError::UnknownLabel { .. }));
}

// ============================================================================
// Sanitized Names
// ============================================================================

#[test]
fn test_sanitized_constants_keep_original_labels() {
    assert_eq!(Status_INPROGRESS.to_string(), "In-Progress!");
    assert_eq!(Status::from_json("\"In-Progress!\"").unwrap(), Status_INPROGRESS);
    assert_eq!(SelectionMethod_RANDOM.to_string(), "<random>");
    assert_eq!(LocationStatus_ICLOUD.to_string(), "iCloud");
    assert_eq!(LimitMethod_MB.value(), 2);
    assert_eq!(MediaKind_BOOKORAUDIOBOOK, MediaKind(12582920));
}

#[test]
fn test_shared_value_renders_last_label() {
    assert_eq!(Preference_LIKED, Preference_LOVED);
    assert_eq!(Preference(2).to_string(), "Loved");
    assert_eq!(Preference(2).to_json(), "\"Loved\"");
    assert_eq!(Preference::from_json("\"Liked\"").unwrap(), Preference(2));
    assert_eq!(Preference::from_json("\"Loved\"").unwrap(), Preference(2));
    assert_eq!(Preference::NAMES.len(), 3);
}

// ============================================================================
// Conversions and Traits
// ============================================================================

#[test]
fn test_from_str_and_conversions() {
    assert_eq!(LogicRule::from_str("contains").unwrap(), LogicRule_CONTAINS);
    assert_eq!("between".parse::<LogicRule>().unwrap(), LogicRule(256));
    assert!("Contains".parse::<LogicRule>().is_err());

    assert_eq!(u32::from(ICloudStatus_MATCHED), 2);
    assert_eq!(ICloudStatus::from(6), ICloudStatus_DUPLICATE);
    assert_eq!(ICloudStatus::new(5), ICloudStatus_LOCALONLY);
    assert_eq!(ICloudStatus::default(), ICloudStatus(0));
    assert_eq!(format!("{:>6}", Color_RED), "   Red");
}

#[test]
fn test_serde_fields() {
    let track = Track {
        name: "Song".to_string(),
        kind: MediaKind_MUSIC,
        love: LoveStatus_LOVED,
    };
    let json = serde_json::to_string(&track).unwrap();
    assert_eq!(json, r#"{"name":"Song","kind":"Music","love":"Loved"}"#);
    assert_eq!(serde_json::from_str::<Track>(&json).unwrap(), track);
    assert!(track.is_loved());

    let criterion: Criterion =
        serde_json::from_str(r#"{"field":"play_date_utc","value":"2024"}"#).unwrap();
    assert_eq!(criterion.field, Field_PLAY_DATE_UTC);
}

#[test]
fn test_serde_rejects_unknown_label() {
    let err = serde_json::from_str::<Track>(r#"{"name":"x","kind":"Vinyl","love":"None"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("unknown MediaKind Vinyl"), "{err}");

    let err = serde_json::from_str::<Track>(r#"{"name":"x","kind":1,"love":"None"}"#).unwrap_err();
    assert!(err.is_data());
}
