//! Flatten a value into `(path, leaf)` entries and rebuild it.
//!
//! Every scalar (including `Null` and `Absent`) becomes one entry at its own
//! path. Empty containers become one entry at their path terminated by the
//! matching marker, carrying the empty container as its value, so `{}` and
//! `[]` survive the round trip.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use flatdiff_types::{ContainerKind, Map, Path, Segment, Value};

use crate::error::{CodecError, CodecResult};

/// One leaf of a flattened value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub path: Path,
    pub value: Value,
}

impl FlatEntry {
    pub fn new(path: Path, value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// Flatten `value` into entries rooted at the empty path.
///
/// Object keys are emitted in the object's own order; canonicalize first for
/// sorted output.
///
/// ```
/// use flatdiff_codec::flatten;
/// use flatdiff_types::Value;
///
/// let entries = flatten(&Value::from(serde_json::json!([10, 20])));
/// let paths: Vec<String> = entries.iter().map(|e| e.path.to_string()).collect();
/// assert_eq!(paths, vec!["@0", "@1"]);
/// ```
pub fn flatten(value: &Value) -> Vec<FlatEntry> {
    flatten_under(value, &Path::root())
}

/// Flatten `value` with every path prefixed by `prefix`.
///
/// `prefix` must not end in a marker.
pub fn flatten_under(value: &Value, prefix: &Path) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    flatten_into(value, prefix.clone(), &mut out);
    out
}

/// Flatten `value` into a path-sorted map.
pub fn flatten_to_map(value: &Value) -> BTreeMap<Path, Value> {
    flatten(value)
        .into_iter()
        .map(|entry| (entry.path, entry.value))
        .collect()
}

fn flatten_into(value: &Value, path: Path, out: &mut Vec<FlatEntry>) {
    match value {
        Value::Array(items) if items.is_empty() => out.push(FlatEntry {
            path: path.marker(ContainerKind::Array),
            value: Value::empty_array(),
        }),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(item, path.index(i), out);
            }
        }
        Value::Object(map) if map.is_empty() => out.push(FlatEntry {
            path: path.marker(ContainerKind::Object),
            value: Value::empty_object(),
        }),
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, path.key(key.as_str()), out);
            }
        }
        scalar => out.push(FlatEntry {
            path,
            value: scalar.clone(),
        }),
    }
}

/// Build entries from string paths, as received from an external caller.
pub fn parse_entries<'a, I>(pairs: I) -> CodecResult<Vec<FlatEntry>>
where
    I: IntoIterator<Item = (&'a str, Value)>,
{
    pairs
        .into_iter()
        .map(|(path, value)| -> CodecResult<FlatEntry> {
            Ok(FlatEntry::new(Path::parse(path)?, value))
        })
        .collect()
}

/// Rebuild a value from its flattened entries. Inverse of [`flatten`].
pub fn unflatten(entries: &[FlatEntry]) -> CodecResult<Value> {
    unflatten_iter(entries.iter().map(|e| (&e.path, &e.value)))
}

/// Rebuild a value from borrowed `(path, leaf)` pairs, e.g. a path map.
///
/// Object keys appear in the order their first entry is seen.
pub fn unflatten_iter<'a, I>(entries: I) -> CodecResult<Value>
where
    I: IntoIterator<Item = (&'a Path, &'a Value)>,
{
    let entries: Vec<Node<'a>> = entries
        .into_iter()
        .map(|(path, value)| (path.segments(), value))
        .collect();
    if entries.is_empty() {
        return Err(CodecError::Empty);
    }
    build(&Path::root(), entries)
}

/// Remaining path segments and the leaf they lead to.
type Node<'a> = (&'a [Segment], &'a Value);

fn build<'a>(at: &Path, entries: Vec<Node<'a>>) -> CodecResult<Value> {
    if let [(segments, value)] = entries.as_slice() {
        match segments {
            [] => return Ok((*value).clone()),
            [Segment::EmptyMap] => return Ok(Value::empty_object()),
            [Segment::EmptySeq] => return Ok(Value::empty_array()),
            _ => {}
        }
    }

    let mut keys: IndexMap<&'a str, Vec<Node<'a>>> = IndexMap::new();
    let mut indices: BTreeMap<usize, Vec<Node<'a>>> = BTreeMap::new();
    let mut object_marker = false;
    let mut array_marker = false;

    for (segments, value) in entries {
        match segments.split_first() {
            None => {
                return Err(CodecError::StructuralConflict {
                    path: at.clone(),
                    reason: "a leaf shares its path with other entries".into(),
                })
            }
            Some((Segment::Key(key), rest)) => {
                keys.entry(key.as_str()).or_default().push((rest, value));
            }
            Some((Segment::Index(index), rest)) => {
                indices.entry(*index).or_default().push((rest, value));
            }
            Some((Segment::EmptyMap, _)) => object_marker = true,
            Some((Segment::EmptySeq, _)) => array_marker = true,
        }
    }

    let is_object = object_marker || !keys.is_empty();
    let is_array = array_marker || !indices.is_empty();
    if is_object && is_array {
        return Err(CodecError::StructuralConflict {
            path: at.clone(),
            reason: "object keys and array indices at the same level".into(),
        });
    }

    if is_array {
        let mut items = Vec::with_capacity(indices.len());
        for (expected, (index, group)) in indices.into_iter().enumerate() {
            if index != expected {
                return Err(CodecError::IndexGap {
                    path: at.clone(),
                    index: expected,
                });
            }
            items.push(build(&at.index(index), group)?);
        }
        return Ok(Value::Array(items));
    }

    let mut map = Map::with_capacity(keys.len());
    for (key, group) in keys {
        let child = build(&at.key(key), group)?;
        map.insert(key.to_string(), child);
    }
    Ok(Value::Object(map))
}
