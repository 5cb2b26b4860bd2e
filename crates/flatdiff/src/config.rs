//! Combined configuration for diffing and patching.

use serde::{Deserialize, Serialize};

use flatdiff_diff::{diff_with_options, DiffOperation, DiffOptions, Patch};
use flatdiff_patch::{apply_with_options, ApplyOptions};
use flatdiff_types::Value;

use crate::error::Result;

/// Options for both halves of a diff/apply cycle.
///
/// Loaded from a TOML document with optional `[diff]` and `[apply]` tables:
///
/// ```toml
/// [diff]
/// array_replace = true
///
/// [apply]
/// strict_add = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatdiffConfig {
    pub diff: DiffOptions,
    pub apply: ApplyOptions,
}

impl FlatdiffConfig {
    /// Parse a configuration document. Missing tables and fields take their
    /// defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Diff `old` against `new` with the configured diff options.
    pub fn diff(&self, old: &Value, new: &Value) -> Patch {
        diff_with_options(old, new, &self.diff)
    }

    /// Apply `operations` to `value` with the configured apply options.
    pub fn apply<O>(&self, value: &Value, operations: O) -> Result<Value>
    where
        O: AsRef<[DiffOperation]>,
    {
        Ok(apply_with_options(value, operations, &self.apply)?)
    }
}
