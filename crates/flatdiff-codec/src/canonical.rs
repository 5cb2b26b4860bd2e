//! Canonical key ordering.
//!
//! Object keys carry no meaning in their order, array elements do. Sorting
//! every object's keys by codepoint lets two equal values with differently
//! ordered keys flatten to the same entry sequence.

use flatdiff_types::{Map, Value};

/// Return a copy of `value` with every object's keys in ascending codepoint
/// order. Arrays keep their order; their elements are canonicalized.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            // Byte order of UTF-8 is codepoint order.
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, child) in entries {
                sorted.insert(key.clone(), canonicalize(child));
            }
            Value::Object(sorted)
        }
        other => other.clone(),
    }
}

/// Returns `true` if every object in `value` already has sorted keys.
pub fn is_canonical(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(is_canonical),
        Value::Object(map) => {
            let keys_sorted = map
                .keys()
                .zip(map.keys().skip(1))
                .all(|(a, b)| a < b);
            keys_sorted && map.values().all(is_canonical)
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    fn unsorted() -> Value {
        let mut inner = Map::new();
        inner.insert("z".into(), Value::from(1_i64));
        inner.insert("a".into(), Value::from(2_i64));
        let mut outer = Map::new();
        outer.insert("b".into(), Value::Array(vec![Value::Object(inner.clone())]));
        outer.insert("a".into(), Value::Object(inner));
        Value::Object(outer)
    }

    #[test]
    fn sorts_nested_keys() {
        let v = canonicalize(&unsorted());
        assert_eq!(keys(&v), vec!["a", "b"]);
        assert_eq!(keys(&v.as_object().unwrap()["a"]), vec!["a", "z"]);
        let in_array = &v.as_object().unwrap()["b"].as_array().unwrap()[0];
        assert_eq!(keys(in_array), vec!["a", "z"]);
    }

    #[test]
    fn content_is_unchanged() {
        let original = unsorted();
        assert_eq!(canonicalize(&original), original);
    }

    #[test]
    fn array_order_is_preserved() {
        let v = Value::from(json!([3, 1, 2]));
        assert_eq!(canonicalize(&v), v);
    }

    #[test]
    fn idempotent() {
        let once = canonicalize(&unsorted());
        let twice = canonicalize(&once);
        assert_eq!(keys(&once), keys(&twice));
        assert_eq!(once, twice);
    }

    #[test]
    fn codepoint_order_not_locale() {
        let mut map = Map::new();
        for key in ["b", "B", "a", "é", "_"] {
            map.insert(key.into(), Value::Null);
        }
        let v = canonicalize(&Value::Object(map));
        assert_eq!(keys(&v), vec!["B", "_", "a", "b", "é"]);
    }

    #[test]
    fn detects_canonical_form() {
        assert!(!is_canonical(&unsorted()));
        assert!(is_canonical(&canonicalize(&unsorted())));
        assert!(is_canonical(&Value::from("scalar")));
    }
}
