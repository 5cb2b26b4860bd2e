//! Mutable flattened view of a value.
//!
//! Entries are kept in a `BTreeMap<Path, Value>`; since paths order by
//! segment, a node and all its descendants occupy one contiguous range.
//! Alongside the entries the map remembers every container position it has
//! seen and that container's kind, so a container emptied by removals can
//! be written back as `{}` or `[]`.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included, Unbounded};

use flatdiff_codec::{flatten_to_map, flatten_under, unflatten_iter, FlatEntry};
use flatdiff_types::{ContainerKind, Path, Value};

use crate::error::{PatchError, PatchResult};

pub(crate) struct PathMap {
    entries: BTreeMap<Path, Value>,
    containers: BTreeMap<Path, ContainerKind>,
}

impl PathMap {
    pub(crate) fn from_value(value: &Value) -> Self {
        let mut map = Self {
            entries: flatten_to_map(value),
            containers: BTreeMap::new(),
        };
        let paths: Vec<Path> = map.entries.keys().cloned().collect();
        for path in &paths {
            map.record_containers(path);
        }
        map
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert `value` under `path`, which must not exist yet.
    ///
    /// A marker entry addresses the container it marks, so `.x.` and `.x`
    /// collide with the same existing node. With `strict` off, a scalar or an
    /// empty container at the target is replaced; a populated container never
    /// is.
    pub(crate) fn add(&mut self, path: &Path, value: &Value, strict: bool) -> PatchResult<()> {
        let entries = expand(path, value)?;
        for entry in &entries {
            let target = entry.path.without_marker();
            self.check_ancestors(&target)?;
            if self.populated(&target) {
                return Err(PatchError::PathConflict {
                    path: entry.path.clone(),
                    reason: "target already holds a non-empty container".into(),
                });
            }
            if strict && self.occupied(&target) {
                return Err(PatchError::PathConflict {
                    path: entry.path.clone(),
                    reason: "target already exists".into(),
                });
            }
        }
        for entry in entries {
            self.remove_subtree(&entry.path.without_marker());
            self.insert(entry);
        }
        Ok(())
    }

    /// Replace the subtree at `path` with `value`. A marker path replaces the
    /// node it marks.
    pub(crate) fn set(&mut self, path: &Path, value: &Value) -> PatchResult<()> {
        let entries = expand(path, value)?;
        let target = path.without_marker();
        self.check_ancestors(&target)?;
        self.remove_subtree(&target);
        for entry in entries {
            self.insert(entry);
        }
        Ok(())
    }

    /// Delete `path` and everything beneath it. Returns the number of
    /// entries removed; a missing path removes nothing.
    pub(crate) fn remove_subtree(&mut self, path: &Path) -> usize {
        let doomed: Vec<Path> = self
            .entries
            .range::<Path, _>((Included(path), Unbounded))
            .take_while(|(key, _)| key.starts_with(path))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            self.entries.remove(key);
        }
        self.containers.retain(|container, _| !container.starts_with(path));
        doomed.len()
    }

    /// Restore the invariant that a container is either empty (one marker
    /// entry) or populated (no marker entry).
    pub(crate) fn reconcile(&mut self) {
        let stale: Vec<Path> = self
            .entries
            .keys()
            .filter(|key| key.is_terminated() && self.populated(&key.without_marker()))
            .cloned()
            .collect();
        for marker in stale {
            self.entries.remove(&marker);
        }

        // Deepest first, so an ancestor sees the marker written for its child.
        let containers: Vec<(Path, ContainerKind)> = self
            .containers
            .iter()
            .rev()
            .map(|(path, kind)| (path.clone(), *kind))
            .collect();
        for (container, kind) in containers {
            if !self.occupied(&container) {
                self.entries.insert(container.marker(kind), empty_container(kind));
            }
        }
    }

    /// Rebuild the tree. An empty map means the root itself was removed.
    pub(crate) fn into_value(self) -> PatchResult<Value> {
        if self.entries.is_empty() {
            return Ok(Value::Absent);
        }
        Ok(unflatten_iter(self.entries.iter())?)
    }

    fn insert(&mut self, entry: FlatEntry) {
        self.record_containers(&entry.path);
        self.entries.insert(entry.path, entry.value);
    }

    fn record_containers(&mut self, path: &Path) {
        for (prefix, segment) in path.ancestors() {
            self.containers.insert(prefix, segment.container_kind());
        }
    }

    /// Every existing ancestor of `target` must be a container of the kind
    /// `target` steps through. Missing ancestors are created on insert.
    fn check_ancestors(&self, target: &Path) -> PatchResult<()> {
        for (prefix, segment) in target.ancestors() {
            let expected = segment.container_kind();
            if let Some(leaf) = self.entries.get(&prefix) {
                return Err(PatchError::PathConflict {
                    path: target.clone(),
                    reason: format!("`{prefix}` is a leaf ({}), not an {expected}", leaf.kind()),
                });
            }
            if let Some(found) = self.child_kind(&prefix) {
                if found != expected {
                    return Err(PatchError::PathConflict {
                        path: target.clone(),
                        reason: format!("`{prefix}` is an {found}, not an {expected}"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Kind of the container at `prefix`, judged by its first descendant.
    fn child_kind(&self, prefix: &Path) -> Option<ContainerKind> {
        self.entries
            .range::<Path, _>((Excluded(prefix), Unbounded))
            .next()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.segments()[prefix.len()].container_kind())
    }

    fn has_descendants(&self, path: &Path) -> bool {
        self.child_kind(path).is_some()
    }

    fn occupied(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.has_descendants(path)
    }

    /// Whether `container` has any descendant other than its own marker.
    fn populated(&self, container: &Path) -> bool {
        self.entries
            .range::<Path, _>((Excluded(container), Unbounded))
            .take_while(|(key, _)| key.starts_with(container))
            .any(|(key, _)| !(key.is_terminated() && key.len() == container.len() + 1))
    }
}

/// Flatten `value` under `path`. A marker path takes only the matching
/// empty container, stored as-is.
fn expand(path: &Path, value: &Value) -> PatchResult<Vec<FlatEntry>> {
    let Some(expected) = path.terminal() else {
        return Ok(flatten_under(value, path));
    };
    let matches = match (expected, value) {
        (ContainerKind::Object, Value::Object(map)) => map.is_empty(),
        (ContainerKind::Array, Value::Array(items)) => items.is_empty(),
        _ => false,
    };
    if !matches {
        return Err(PatchError::MarkerMismatch {
            path: path.clone(),
            expected,
            found: value.kind(),
        });
    }
    Ok(vec![FlatEntry::new(path.clone(), value.clone())])
}

fn empty_container(kind: ContainerKind) -> Value {
    match kind {
        ContainerKind::Object => Value::empty_object(),
        ContainerKind::Array => Value::empty_array(),
    }
}
