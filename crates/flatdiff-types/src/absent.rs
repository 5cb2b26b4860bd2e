//! Absence substitution.
//!
//! [`Value`] models "no value" natively, so the codec, diff and apply never
//! need this pass. It exists for representations that cannot express a
//! fourth "no value" case, most notably JSON on the wire: `Absent` is written
//! as [`ABSENT_SENTINEL`] and read back from it. A real string equal to the
//! sentinel does not survive that trip.

use crate::value::Value;

/// Reserved token standing in for [`Value::Absent`].
pub const ABSENT_SENTINEL: &str = "__UNDEFINED__";

/// Replace every `Absent` in `value` with the sentinel string.
pub fn substitute_absent(value: &Value) -> Value {
    match value {
        Value::Absent => Value::String(ABSENT_SENTINEL.to_string()),
        Value::Array(items) => Value::Array(items.iter().map(substitute_absent).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_absent(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Replace every sentinel string in `value` with `Absent`.
///
/// Exact inverse of [`substitute_absent`].
pub fn restore_absent(value: &Value) -> Value {
    match value {
        Value::String(s) if s == ABSENT_SENTINEL => Value::Absent,
        Value::Array(items) => Value::Array(items.iter().map(restore_absent).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), restore_absent(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Returns `true` if `Absent` occurs anywhere in `value`.
pub fn contains_absent(value: &Value) -> bool {
    match value {
        Value::Absent => true,
        Value::Array(items) => items.iter().any(contains_absent),
        Value::Object(map) => map.values().any(contains_absent),
        _ => false,
    }
}
