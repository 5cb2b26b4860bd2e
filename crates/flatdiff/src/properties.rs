//! Property tests over arbitrary values.

use proptest::prelude::*;

use crate::{
    apply, canonicalize, diff, flatten, is_canonical, restore_absent, substitute_absent,
    unflatten, Patch, Path, Value,
};

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,4}",
        1 => "[a-z.@~]{0,3}",
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Absent),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,6}".prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..5)
                .prop_map(|map| map.into_iter().collect::<Value>()),
        ]
    })
}

/// A pair of values that often share structure, so diffs stay small.
fn arb_related() -> impl Strategy<Value = (Value, Value)> {
    (arb_value(), arb_value(), any::<bool>()).prop_map(|(a, b, nest)| {
        if nest {
            let wrapped: Value = vec![("shared".to_string(), a.clone()), ("other".to_string(), b)]
                .into_iter()
                .collect();
            let original: Value = vec![("shared".to_string(), a)].into_iter().collect();
            (original, wrapped)
        } else {
            (a, b)
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn flatten_roundtrip(value in arb_value()) {
        crate::init_test_tracing();
        let entries = flatten(&value);
        prop_assert!(!entries.is_empty());
        prop_assert_eq!(unflatten(&entries).unwrap(), value);
    }

    #[test]
    fn rendered_paths_reparse(value in arb_value()) {
        for entry in flatten(&value) {
            let rendered = entry.path.to_string();
            prop_assert_eq!(Path::parse(&rendered).unwrap(), entry.path);
        }
    }

    #[test]
    fn absent_substitution_roundtrip(value in arb_value()) {
        let substituted = substitute_absent(&value);
        let rebuilt = unflatten(&flatten(&substituted)).unwrap();
        prop_assert_eq!(restore_absent(&rebuilt), value);
    }

    #[test]
    fn diff_then_apply((old, new) in arb_related()) {
        crate::init_test_tracing();
        let patch = diff(&old, &new);
        let patched = apply(&old, &patch).unwrap();
        prop_assert_eq!(canonicalize(&patched), canonicalize(&new));
    }

    #[test]
    fn diff_of_equal_values_is_empty(value in arb_value()) {
        prop_assert!(diff(&value, &value).is_empty());
        prop_assert!(diff(&value, &canonicalize(&value)).is_empty());
    }

    #[test]
    fn canonicalize_is_idempotent(value in arb_value()) {
        let once = canonicalize(&value);
        prop_assert!(is_canonical(&once));
        prop_assert_eq!(canonicalize(&once), once.clone());
        prop_assert_eq!(once, value);
    }

    #[test]
    fn patch_survives_the_wire((old, new) in arb_related()) {
        let patch = diff(&old, &new);
        let received = Patch::from_json_str(&patch.to_json_string().unwrap()).unwrap();
        prop_assert_eq!(received, patch);
    }
}
