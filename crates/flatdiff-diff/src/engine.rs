//! Structural diff between two values.
//!
//! Both inputs are canonicalized once, then walked together:
//!
//! - differing kinds or unequal scalars emit one `set` and stop;
//! - objects visit the sorted union of their keys;
//! - arrays visit indices `0..max(len)` in ascending order;
//! - a key or index only on the new side emits one `add` per flattened leaf;
//! - a key or index only on the old side emits one `remove` for the subtree.
//!
//! Operations come out in traversal order, which is the order they must be
//! applied in.

use std::collections::BTreeSet;

use tracing::debug;

use flatdiff_codec::{canonicalize, flatten_under};
use flatdiff_types::{Map, Number, Path, Value};

use crate::operation::{DiffOperation, Patch};
use crate::options::DiffOptions;

/// Compute the patch turning `old` into `new` with default options.
///
/// ```
/// use flatdiff_diff::diff;
/// use flatdiff_types::Value;
/// use serde_json::json;
///
/// let patch = diff(
///     &Value::from(json!({"x": 1, "y": 2})),
///     &Value::from(json!({"x": 1, "y": 3, "z": 4})),
/// );
/// assert_eq!(patch.sets(), 1);
/// assert_eq!(patch.additions(), 1);
/// ```
pub fn diff(old: &Value, new: &Value) -> Patch {
    diff_with_options(old, new, &DiffOptions::default())
}

/// Compute the patch turning `old` into `new`.
pub fn diff_with_options(old: &Value, new: &Value, options: &DiffOptions) -> Patch {
    let old = canonicalize(old);
    let new = canonicalize(new);

    let mut walker = Walker {
        options,
        operations: Vec::new(),
    };
    walker.diff_at(&old, &new, &Path::root());

    let patch = Patch::from(walker.operations);
    debug!(
        operations = patch.len(),
        additions = patch.additions(),
        removals = patch.removals(),
        sets = patch.sets(),
        array_replace = options.array_replace,
        "diff computed"
    );
    patch
}

struct Walker<'o> {
    options: &'o DiffOptions,
    operations: Vec<DiffOperation>,
}

impl Walker<'_> {
    fn diff_at(&mut self, old: &Value, new: &Value, path: &Path) {
        match (old, new) {
            (Value::Object(left), Value::Object(right)) => self.diff_objects(left, right, path),
            (Value::Array(left), Value::Array(right)) => self.diff_arrays(left, right, new, path),
            (Value::Number(left), Value::Number(right)) if same_number(left, right) => {}
            _ if old == new => {}
            _ => self.operations.push(DiffOperation::set(path.clone(), new.clone())),
        }
    }

    fn diff_objects(&mut self, left: &Map, right: &Map, path: &Path) {
        let keys: BTreeSet<&str> = left
            .keys()
            .chain(right.keys())
            .map(String::as_str)
            .collect();

        for key in keys {
            let child = path.key(key);
            match (left.get(key), right.get(key)) {
                (Some(old), Some(new)) => self.diff_at(old, new, &child),
                (Some(_), None) => self.operations.push(DiffOperation::remove(child)),
                (None, Some(added)) => self.push_additions(added, &child),
                (None, None) => {}
            }
        }
    }

    fn diff_arrays(&mut self, left: &[Value], right: &[Value], new: &Value, path: &Path) {
        if self.options.array_replace && left.len() != right.len() {
            self.operations.push(DiffOperation::set(path.clone(), new.clone()));
            return;
        }

        for i in 0..left.len().max(right.len()) {
            let child = path.index(i);
            match (left.get(i), right.get(i)) {
                (Some(old), Some(new)) => self.diff_at(old, new, &child),
                (Some(_), None) => self.operations.push(DiffOperation::remove(child)),
                (None, Some(added)) => self.push_additions(added, &child),
                (None, None) => {}
            }
        }
    }

    fn push_additions(&mut self, value: &Value, path: &Path) {
        self.operations.extend(
            flatten_under(value, path)
                .into_iter()
                .map(|entry| DiffOperation::add(entry.path, entry.value)),
        );
    }
}

/// Numbers compare by value: `1` and `1.0` are the same number. Two
/// integers compare exactly, without a detour through `f64`.
fn same_number(left: &Number, right: &Number) -> bool {
    if left.is_f64() || right.is_f64() {
        left.as_f64() == right.as_f64()
    } else {
        left == right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn ops(patch: &Patch) -> serde_json::Value {
        serde_json::to_value(patch).unwrap()
    }

    #[test]
    fn identical_values_no_diff() {
        let value = v(json!({"a": [1, {"b": null}], "c": {}, "d": []}));
        assert!(diff(&value, &value).is_empty());
        assert!(diff(&Value::Absent, &Value::Absent).is_empty());
    }

    #[test]
    fn key_order_is_irrelevant() {
        let mut reordered = Map::new();
        reordered.insert("y".into(), Value::from(2_i64));
        reordered.insert("x".into(), Value::from(1_i64));
        assert!(diff(&v(json!({"x": 1, "y": 2})), &Value::Object(reordered)).is_empty());
    }

    #[test]
    fn set_and_add() {
        let patch = diff(&v(json!({"x": 1, "y": 2})), &v(json!({"x": 1, "y": 3, "z": 4})));
        assert_eq!(
            ops(&patch),
            json!([
                {"type": "set", "path": ".y", "value": 3},
                {"type": "add", "path": ".z", "value": 4},
            ])
        );
    }

    #[test]
    fn array_element_changes() {
        let patch = diff(&v(json!({"items": [1, 2, 3]})), &v(json!({"items": [1, 4, 3, 5]})));
        assert_eq!(
            ops(&patch),
            json!([
                {"type": "set", "path": ".items@1", "value": 4},
                {"type": "add", "path": ".items@3", "value": 5},
            ])
        );
    }

    #[test]
    fn removal_is_atomic() {
        let patch = diff(&v(json!({"x": 1, "y": {"a": 1, "b": 2}})), &v(json!({"x": 1})));
        assert_eq!(ops(&patch), json!([{"type": "remove", "path": ".y"}]));
    }

    #[test]
    fn shrinking_array_removes_trailing_indices() {
        let patch = diff(&v(json!([1, 2, 3])), &v(json!([1])));
        assert_eq!(
            ops(&patch),
            json!([
                {"type": "remove", "path": "@1"},
                {"type": "remove", "path": "@2"},
            ])
        );
    }

    #[test]
    fn added_subtree_is_flattened() {
        let patch = diff(&v(json!({})), &v(json!({"svc": {"ports": [80], "env": {}, "deps": []}})));
        assert_eq!(
            ops(&patch),
            json!([
                {"type": "add", "path": ".svc.deps@", "value": []},
                {"type": "add", "path": ".svc.env.", "value": {}},
                {"type": "add", "path": ".svc.ports@0", "value": 80},
            ])
        );
    }

    #[test]
    fn kind_change_is_single_set() {
        let patch = diff(&v(json!({"x": [1, 2]})), &v(json!({"x": {"a": 1}})));
        assert_eq!(
            ops(&patch),
            json!([{"type": "set", "path": ".x", "value": {"a": 1}}])
        );
    }

    #[test]
    fn root_scalar_change() {
        let patch = diff(&v(json!(1)), &v(json!("one")));
        assert_eq!(ops(&patch), json!([{"type": "set", "path": "", "value": "one"}]));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(diff(&v(json!({"x": 1})), &v(json!({"x": 1.0}))).is_empty());
        assert!(diff(&v(json!([-2.0])), &v(json!([-2]))).is_empty());
        assert_eq!(
            ops(&diff(&v(json!({"x": 1})), &v(json!({"x": 1.5})))),
            json!([{"type": "set", "path": ".x", "value": 1.5}])
        );
        let big = diff(&v(json!(i64::MAX)), &v(json!(i64::MAX - 1)));
        assert_eq!(big.sets(), 1);
    }

    #[test]
    fn null_and_absent_are_different() {
        let mut with_absent = Map::new();
        with_absent.insert("x".into(), Value::Absent);
        let patch = diff(&v(json!({"x": null})), &Value::Object(with_absent));
        assert_eq!(
            patch.operations,
            vec![DiffOperation::set(Path::root().key("x"), Value::Absent)]
        );
    }

    #[test]
    fn empty_container_changes() {
        assert!(diff(&v(json!({})), &v(json!({}))).is_empty());
        assert_eq!(
            ops(&diff(&v(json!({"a": 1})), &v(json!({})))),
            json!([{"type": "remove", "path": ".a"}])
        );
        assert_eq!(
            ops(&diff(&v(json!([])), &v(json!({})))),
            json!([{"type": "set", "path": "", "value": {}}])
        );
    }

    #[test]
    fn keys_visited_in_sorted_order() {
        let patch = diff(&v(json!({"b": 1, "a": 1, "c": 1})), &v(json!({"c": 2, "b": 2, "a": 2})));
        let paths: Vec<String> = patch.iter().map(|op| op.path().to_string()).collect();
        assert_eq!(paths, vec![".a", ".b", ".c"]);
    }

    #[test]
    fn many_small_changes() {
        let old: Value = (0..50_i64).map(|i| (format!("prop{i}"), Value::from(i))).collect();
        let new: Value = (0..50_i64).map(|i| (format!("prop{i}"), Value::from(i + 1))).collect();
        let patch = diff(&old, &new);
        assert_eq!(patch.len(), 50);
        assert_eq!(patch.sets(), 50);
    }

    #[test]
    fn array_replace_when_lengths_differ() {
        let options = DiffOptions::array_replace();
        let patch = diff_with_options(&v(json!([1, 2, 3])), &v(json!([1, 2, 4, 5])), &options);
        assert_eq!(
            ops(&patch),
            json!([{"type": "set", "path": "", "value": [1, 2, 4, 5]}])
        );

        let nested = diff_with_options(
            &v(json!({"items": [1, 2, 3], "name": "test"})),
            &v(json!({"items": [1, 2, 3, 4, 5], "name": "test"})),
            &options,
        );
        assert_eq!(
            ops(&nested),
            json!([{"type": "set", "path": ".items", "value": [1, 2, 3, 4, 5]}])
        );
    }

    #[test]
    fn array_replace_same_length_is_elementwise() {
        let patch = diff_with_options(
            &v(json!([1, 2, 3])),
            &v(json!([1, 2, 4])),
            &DiffOptions::array_replace(),
        );
        assert_eq!(ops(&patch), json!([{"type": "set", "path": "@2", "value": 4}]));
    }

    #[test]
    fn without_array_replace_is_elementwise() {
        let patch = diff(&v(json!([1, 2, 3])), &v(json!([1, 2, 4, 5])));
        assert_eq!(
            ops(&patch),
            json!([
                {"type": "set", "path": "@2", "value": 4},
                {"type": "add", "path": "@3", "value": 5},
            ])
        );
    }

    #[test]
    fn escaped_key_paths() {
        let patch = diff(&v(json!({"a.b": 1})), &v(json!({"a.b": 2})));
        assert_eq!(ops(&patch), json!([{"type": "set", "path": ".a~1b", "value": 2}]));
    }
}
