//! Property-based laws for the extraction matrix.
//!
//! Uses `proptest` to generate random value trees and verify:
//!
//! - determinism: repeated extraction of the same key yields the same result
//! - absence symmetry: an absent key is FieldMissing for every required
//!   operation and `None` for every optional operation
//! - the sequence laws: all-or-nothing under the primitive strategy,
//!   filtering with preserved order under the self-describing strategy

use fieldwise_core::{DecodeError, Decoder, FromValue, FromValueError, RawBacked};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Priority {
    Low,
    High,
}

impl RawBacked for Priority {
    type Raw = i64;

    fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(Priority::Low),
            2 => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Leaf {
    name: String,
}

impl FromValue for Leaf {
    fn from_value(value: &Value) -> Result<Self, FromValueError> {
        let dec = Decoder::new(value);
        Ok(Leaf {
            name: dec.scalar("name", &[])?,
        })
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,8}").unwrap()
}

/// A sequence element that is either a string or an integer.
fn arb_element() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Value::String),
        any::<i64>().prop_map(|n| json!(n)),
    ]
}

fn object_from(entries: &[(String, i64)]) -> Value {
    let mut map = Map::new();
    for (key, value) in entries {
        map.insert(key.clone(), json!(value));
    }
    Value::Object(map)
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    #[test]
    fn extraction_is_deterministic(
        entries in prop::collection::vec((arb_key(), any::<i64>()), 0..8)
    ) {
        let data = object_from(&entries);
        let dec = Decoder::new(&data);
        for (key, _) in &entries {
            let first = dec.scalar::<i64>(key, &[]).unwrap();
            let second = dec.scalar::<i64>(key, &[]).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(dec.opt_scalar::<i64>(key), Some(second));
        }
    }
}

// ============================================================================
// Absence symmetry
// ============================================================================

proptest! {
    #[test]
    fn absent_key_is_missing_for_required_and_none_for_optional(
        entries in prop::collection::vec((arb_key(), any::<i64>()), 0..8),
        probe in arb_key(),
    ) {
        let mut data = object_from(&entries);
        if let Some(map) = data.as_object_mut() {
            map.remove(&probe);
        }
        let dec = Decoder::new(&data);

        prop_assert!(matches!(
            dec.scalar::<String>(&probe, &[]),
            Err(DecodeError::FieldMissing { .. })
        ), "expected FieldMissing");
        prop_assert!(matches!(
            dec.nested::<Leaf>(&probe, &[]),
            Err(DecodeError::FieldMissing { .. })
        ), "expected FieldMissing");
        prop_assert!(matches!(
            dec.raw_enum::<Priority>(&probe),
            Err(DecodeError::FieldMissing { .. })
        ), "expected FieldMissing");
        prop_assert!(matches!(
            dec.scalar_seq::<String>(&probe, &[]),
            Err(DecodeError::FieldMissing { .. })
        ), "expected FieldMissing");
        prop_assert!(matches!(
            dec.nested_seq::<Leaf>(&probe, &[]),
            Err(DecodeError::FieldMissing { .. })
        ), "expected FieldMissing");
        prop_assert!(matches!(
            dec.raw_enum_seq::<Priority>(&probe),
            Err(DecodeError::FieldMissing { .. })
        ), "expected FieldMissing");

        prop_assert_eq!(dec.opt_scalar::<String>(&probe), None);
        prop_assert_eq!(dec.opt_nested::<Leaf>(&probe), None);
        prop_assert_eq!(dec.opt_raw_enum::<Priority>(&probe), None);
        prop_assert_eq!(dec.opt_scalar_seq::<String>(&probe), None);
        prop_assert_eq!(dec.opt_nested_seq::<Leaf>(&probe), None);
        prop_assert_eq!(dec.opt_raw_enum_seq::<Priority>(&probe), None);
    }
}

// ============================================================================
// Sequence laws
// ============================================================================

proptest! {
    #[test]
    fn primitive_sequences_are_all_or_nothing(
        elements in prop::collection::vec(arb_element(), 0..12)
    ) {
        let strings: Vec<String> = elements
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect();
        let has_non_string = strings.len() != elements.len();

        let data = json!({ "items": elements });
        let dec = Decoder::new(&data);
        let result = dec.scalar_seq::<String>("items", &[]);

        if has_non_string {
            prop_assert!(matches!(result, Err(DecodeError::Conversion { .. })), "expected Conversion");
        } else {
            prop_assert_eq!(result.unwrap(), strings);
        }
    }

    #[test]
    fn self_describing_sequences_filter_and_preserve_order(
        elements in prop::collection::vec(arb_element(), 0..12)
    ) {
        let strings: Vec<String> = elements
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect();

        let data = json!({ "items": elements });
        let dec = Decoder::new(&data);
        let kept = dec.nested_seq::<String>("items", &[]).unwrap();

        prop_assert_eq!(kept, strings);
    }
}
