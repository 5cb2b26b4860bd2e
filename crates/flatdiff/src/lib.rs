//! flatdiff: flatten tree values into path/value pairs, diff them, and
//! patch them back.
//!
//! This is the main entry point for applications embedding flatdiff. It
//! re-exports the value model, the path codec, the diff engine and the
//! patch applier, and adds helpers that work directly on JSON documents.
//!
//! ```
//! use flatdiff::{apply, diff, Value};
//! use serde_json::json;
//!
//! let old = Value::from(json!({"obj": {"x": 1}, "arr": [1, 2]}));
//! let new = Value::from(json!({"obj": {}, "arr": []}));
//! let patch = diff(&old, &new);
//! assert_eq!(apply(&old, &patch).unwrap(), new);
//! ```

pub mod config;
pub mod error;

#[cfg(test)]
mod properties;

use tracing::debug;

pub use config::FlatdiffConfig;
pub use error::{Error, Result};

// Re-export key types
pub use flatdiff_codec::{
    canonicalize, flatten, flatten_under, is_canonical, parse_entries, unflatten, CodecError,
    FlatEntry,
};
pub use flatdiff_diff::{
    diff, diff_with_options, DiffError, DiffOperation, DiffOptions, OperationKind, Patch,
};
pub use flatdiff_patch::{apply, apply_with_options, ApplyOptions, PatchError};
pub use flatdiff_types::{
    restore_absent, substitute_absent, ContainerKind, Map, Path, PathError, Segment, Value,
    ValueKind, ABSENT_SENTINEL,
};

/// Flatten a JSON document into `(path, value)` string pairs.
///
/// Sentinel strings in the input are read as absent slots and written back
/// out as sentinels.
pub fn flatten_json(json: serde_json::Value) -> Vec<(String, serde_json::Value)> {
    let value = Value::from_json_restoring(json);
    let pairs: Vec<(String, serde_json::Value)> = flatten(&value)
        .into_iter()
        .map(|entry| (entry.path.to_string(), entry.value.to_json()))
        .collect();
    debug!(entries = pairs.len(), "flattened json document");
    pairs
}

/// Rebuild a JSON document from `(path, value)` string pairs.
pub fn unflatten_json<'a, I>(pairs: I) -> Result<serde_json::Value>
where
    I: IntoIterator<Item = (&'a str, serde_json::Value)>,
{
    let entries = parse_entries(
        pairs
            .into_iter()
            .map(|(path, json)| (path, Value::from_json_restoring(json))),
    )?;
    Ok(unflatten(&entries)?.to_json())
}

/// Diff two JSON documents, reading sentinel strings as absent slots.
pub fn diff_json(old: &serde_json::Value, new: &serde_json::Value) -> Patch {
    diff(
        &Value::from_json_restoring(old.clone()),
        &Value::from_json_restoring(new.clone()),
    )
}

/// Apply a patch to a JSON document.
pub fn apply_json<O>(json: &serde_json::Value, operations: O) -> Result<serde_json::Value>
where
    O: AsRef<[DiffOperation]>,
{
    let value = Value::from_json_restoring(json.clone());
    Ok(apply(&value, operations)?.to_json())
}

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
