//! Error types for the patch crate.

use flatdiff_codec::CodecError;
use flatdiff_types::{ContainerKind, Path, ValueKind};

/// Errors that can occur while applying a patch.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// An operation targets a location its surroundings cannot hold, e.g. a
    /// key beneath a scalar or an index beneath an object.
    #[error("path conflict at `{path}`: {reason}")]
    PathConflict { path: Path, reason: String },

    /// A marker path was given something other than the matching empty
    /// container.
    #[error("marker path `{path}` expects an empty {expected}, got {found}")]
    MarkerMismatch {
        path: Path,
        expected: ContainerKind,
        found: ValueKind,
    },

    /// The edited path map no longer describes a single tree.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Options could not be parsed from TOML.
    #[error("invalid apply options: {0}")]
    Options(#[from] toml::de::Error),
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;
