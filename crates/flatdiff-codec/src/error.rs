//! Error types for the codec crate.

use flatdiff_types::{Path, PathError};

/// Errors that can occur while rebuilding a value from flat entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Entries at one nesting level cannot belong to a single node, e.g.
    /// object keys mixed with array indices.
    #[error("structural conflict at `{path}`: {reason}")]
    StructuralConflict { path: Path, reason: String },

    /// An array's indices are not contiguous from zero. This is a structural
    /// conflict with its own variant so callers can report the hole.
    #[error("array at `{path}` is missing index {index}")]
    IndexGap { path: Path, index: usize },

    /// No entries were supplied.
    #[error("cannot unflatten an empty entry list")]
    Empty,

    /// A path string could not be parsed.
    #[error("malformed path: {0}")]
    MalformedPath(#[from] PathError),
}

impl CodecError {
    /// Returns `true` for conflicts in the shape of the entry set.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralConflict { .. } | Self::IndexGap { .. })
    }
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
