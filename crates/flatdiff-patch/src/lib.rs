//! Patch applier for flatdiff.
//!
//! Replays a [`Patch`](flatdiff_diff::Patch) against a value by flattening
//! the value into a sorted path map, editing the map operation by operation,
//! and rebuilding the tree. Empty objects and arrays emptied by removals are
//! kept rather than dropped.
//!
//! # Key Types
//!
//! - [`apply`] / [`apply_with_options`] -- The entry points
//! - [`ApplyOptions`] -- Strictness switches, loadable from TOML
//! - [`PatchError`] -- Path conflicts and structural failures

pub mod apply;
pub mod error;
pub mod options;
mod path_map;

pub use apply::{apply, apply_with_options};
pub use error::{PatchError, PatchResult};
pub use options::ApplyOptions;
