//! Patch application.

use tracing::{debug, trace};

use flatdiff_codec::canonicalize;
use flatdiff_diff::DiffOperation;
use flatdiff_types::Value;

use crate::error::PatchResult;
use crate::options::ApplyOptions;
use crate::path_map::PathMap;

/// Apply `operations` to `value` in order, with default options.
///
/// The input is never modified. Fails fast on the first operation that
/// conflicts with the structure built so far.
///
/// ```
/// use flatdiff_diff::diff;
/// use flatdiff_patch::apply;
/// use flatdiff_types::Value;
/// use serde_json::json;
///
/// let old = Value::from(json!({"x": 1, "tags": ["a"]}));
/// let new = Value::from(json!({"x": 2, "tags": []}));
/// assert_eq!(apply(&old, &diff(&old, &new)).unwrap(), new);
/// ```
pub fn apply<O>(value: &Value, operations: O) -> PatchResult<Value>
where
    O: AsRef<[DiffOperation]>,
{
    apply_with_options(value, operations, &ApplyOptions::default())
}

/// Apply `operations` to `value` in order.
pub fn apply_with_options<O>(
    value: &Value,
    operations: O,
    options: &ApplyOptions,
) -> PatchResult<Value>
where
    O: AsRef<[DiffOperation]>,
{
    let operations = operations.as_ref();
    let mut map = PathMap::from_value(&canonicalize(value));

    for (index, operation) in operations.iter().enumerate() {
        trace!(index, %operation, "applying operation");
        let outcome = match operation {
            DiffOperation::Add { path, value } => map.add(path, value, options.strict_add),
            DiffOperation::Set { path, value } => map.set(path, value),
            DiffOperation::Remove { path } => {
                let removed = map.remove_subtree(path);
                trace!(index, %path, removed, "subtree removed");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            debug!(index, %operation, error = %e, "operation rejected");
            return Err(e);
        }
    }

    map.reconcile();
    let entries = map.len();
    let result = map.into_value()?;
    debug!(operations = operations.len(), entries, "patch applied");
    Ok(result)
}
