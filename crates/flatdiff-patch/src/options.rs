use serde::{Deserialize, Serialize};

use crate::error::PatchResult;

/// Configuration for [`apply_with_options`](crate::apply_with_options).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyOptions {
    /// When `true`, an `add` whose target already holds a scalar is a path
    /// conflict. When `false` the scalar is overwritten.
    pub strict_add: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self { strict_add: true }
    }
}

impl ApplyOptions {
    /// Options that let `add` overwrite existing scalars.
    pub fn lenient() -> Self {
        Self { strict_add: false }
    }

    /// Parse options from a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> PatchResult<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_by_default() {
        assert!(ApplyOptions::default().strict_add);
        assert!(!ApplyOptions::lenient().strict_add);
    }

    #[test]
    fn from_toml() {
        assert_eq!(ApplyOptions::from_toml_str("").unwrap(), ApplyOptions::default());
        assert_eq!(
            ApplyOptions::from_toml_str("strict_add = false").unwrap(),
            ApplyOptions::lenient()
        );
        assert!(ApplyOptions::from_toml_str("strict_add = 3").is_err());
    }
}
