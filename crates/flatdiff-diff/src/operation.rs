//! Path-addressed patch operations and their wire format.
//!
//! An operation serializes as `{"type": "add"|"remove"|"set", "path": "...",
//! "value": ...}`, with `value` omitted for `remove`. A [`Patch`] serializes
//! as a plain JSON array of operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use flatdiff_types::{Path, Value};

use crate::error::DiffResult;

/// One step of a patch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffOperation {
    /// A leaf appears at a path that did not exist before.
    Add { path: Path, value: Value },
    /// A path and everything beneath it cease to exist.
    Remove { path: Path },
    /// The subtree at a path is replaced wholesale.
    Set { path: Path, value: Value },
}

/// The variant of a [`DiffOperation`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Remove,
    Set,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Remove => f.write_str("remove"),
            Self::Set => f.write_str("set"),
        }
    }
}

impl DiffOperation {
    pub fn add(path: Path, value: impl Into<Value>) -> Self {
        Self::Add {
            path,
            value: value.into(),
        }
    }

    pub fn remove(path: Path) -> Self {
        Self::Remove { path }
    }

    pub fn set(path: Path, value: impl Into<Value>) -> Self {
        Self::Set {
            path,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Add { .. } => OperationKind::Add,
            Self::Remove { .. } => OperationKind::Remove,
            Self::Set { .. } => OperationKind::Set,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Add { path, .. } | Self::Remove { path } | Self::Set { path, .. } => path,
        }
    }

    /// The carried value; `None` for `remove`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Add { value, .. } | Self::Set { value, .. } => Some(value),
            Self::Remove { .. } => None,
        }
    }
}

impl fmt::Display for DiffOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{} `{}` {}", self.kind(), self.path(), value),
            None => write!(f, "{} `{}`", self.kind(), self.path()),
        }
    }
}

/// An ordered list of operations, as produced by [`diff`](crate::diff).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch {
    /// The operations, in application order.
    pub operations: Vec<DiffOperation>,
}

impl Patch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Number of `add` operations.
    pub fn additions(&self) -> usize {
        self.count(OperationKind::Add)
    }

    /// Number of `remove` operations.
    pub fn removals(&self) -> usize {
        self.count(OperationKind::Remove)
    }

    /// Number of `set` operations.
    pub fn sets(&self) -> usize {
        self.count(OperationKind::Set)
    }

    pub fn push(&mut self, operation: DiffOperation) {
        self.operations.push(operation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffOperation> {
        self.operations.iter()
    }

    pub fn as_slice(&self) -> &[DiffOperation] {
        &self.operations
    }

    /// Serialize to a JSON array.
    pub fn to_json_string(&self) -> DiffResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON array of operations.
    pub fn from_json_str(json: &str) -> DiffResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn count(&self, kind: OperationKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }
}

impl From<Vec<DiffOperation>> for Patch {
    fn from(operations: Vec<DiffOperation>) -> Self {
        Self { operations }
    }
}

impl FromIterator<DiffOperation> for Patch {
    fn from_iter<I: IntoIterator<Item = DiffOperation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Patch {
    type Item = DiffOperation;
    type IntoIter = std::vec::IntoIter<DiffOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a DiffOperation;
    type IntoIter = std::slice::Iter<'a, DiffOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl AsRef<[DiffOperation]> for Patch {
    fn as_ref(&self) -> &[DiffOperation] {
        &self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatdiff_types::ABSENT_SENTINEL;
    use serde_json::json;

    fn p(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    #[test]
    fn wire_format() {
        let patch = Patch::from(vec![
            DiffOperation::set(p(".y"), 3_i64),
            DiffOperation::add(p(".z"), 4_i64),
            DiffOperation::remove(p(".w@0")),
        ]);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!([
                {"type": "set", "path": ".y", "value": 3},
                {"type": "add", "path": ".z", "value": 4},
                {"type": "remove", "path": ".w@0"},
            ])
        );
    }

    #[test]
    fn wire_roundtrip() {
        let patch = Patch::from(vec![
            DiffOperation::add(p(".tags@"), Value::empty_array()),
            DiffOperation::set(p(""), Value::from(json!({"a": [1, {"b": null}]}))),
            DiffOperation::remove(p(".a~1b")),
        ]);
        let text = patch.to_json_string().unwrap();
        assert_eq!(Patch::from_json_str(&text).unwrap(), patch);
    }

    #[test]
    fn absent_travels_as_sentinel() {
        let patch = Patch::from(vec![DiffOperation::set(p(".x"), Value::Absent)]);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json[0]["value"], json!(ABSENT_SENTINEL));
        let back: Patch = serde_json::from_value(json).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn rejects_malformed_path() {
        let err = Patch::from_json_str(r#"[{"type":"remove","path":"x"}]"#).unwrap_err();
        assert!(matches!(err, crate::DiffError::Serialization(_)));
    }

    #[test]
    fn rejects_unknown_type() {
        assert!(Patch::from_json_str(r#"[{"type":"move","path":".x"}]"#).is_err());
    }

    #[test]
    fn counts_by_kind() {
        let patch: Patch = vec![
            DiffOperation::add(p(".a"), 1_i64),
            DiffOperation::add(p(".b"), 2_i64),
            DiffOperation::remove(p(".c")),
            DiffOperation::set(p(".d"), 3_i64),
        ]
        .into_iter()
        .collect();
        assert_eq!(patch.len(), 4);
        assert_eq!(patch.additions(), 2);
        assert_eq!(patch.removals(), 1);
        assert_eq!(patch.sets(), 1);
    }

    #[test]
    fn accessors() {
        let op = DiffOperation::set(p(".a@1"), "x");
        assert_eq!(op.kind(), OperationKind::Set);
        assert_eq!(op.path().to_string(), ".a@1");
        assert_eq!(op.value(), Some(&Value::from("x")));
        assert_eq!(DiffOperation::remove(p(".a")).value(), None);
    }

    #[test]
    fn display() {
        assert_eq!(DiffOperation::add(p(".a"), 1_i64).to_string(), "add `.a` 1");
        assert_eq!(DiffOperation::remove(p("@2")).to_string(), "remove `@2`");
    }
}
