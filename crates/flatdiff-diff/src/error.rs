//! Error types for the diff crate.

/// Errors that can occur around diff operations.
///
/// Computing a diff never fails; these cover loading options and decoding
/// serialized patches.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Options could not be parsed from TOML.
    #[error("invalid diff options: {0}")]
    Options(#[from] toml::de::Error),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
