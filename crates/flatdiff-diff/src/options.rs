use serde::{Deserialize, Serialize};

use crate::error::DiffResult;

/// Configuration for [`diff_with_options`](crate::diff_with_options).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// When `true`, two arrays of different length produce a single `set` of
    /// the whole new array instead of per-index operations. Arrays of equal
    /// length are still compared element by element.
    pub array_replace: bool,
}

impl DiffOptions {
    /// Options that replace arrays whose length changed.
    pub fn array_replace() -> Self {
        Self {
            array_replace: true,
        }
    }

    /// Parse options from a TOML document. Missing fields take their defaults.
    ///
    /// ```
    /// use flatdiff_diff::DiffOptions;
    ///
    /// let options = DiffOptions::from_toml_str("array_replace = true").unwrap();
    /// assert!(options.array_replace);
    /// ```
    pub fn from_toml_str(source: &str) -> DiffResult<Self> {
        Ok(toml::from_str(source)?)
    }
}
