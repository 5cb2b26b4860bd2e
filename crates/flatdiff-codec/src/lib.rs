//! Path codec for flatdiff.
//!
//! Converts a [`Value`](flatdiff_types::Value) tree into an ordered list of
//! `(path, leaf)` pairs and back, and normalizes object key order so that
//! semantically equal values flatten identically.
//!
//! # Key Types
//!
//! - [`FlatEntry`] -- One `(path, leaf)` pair
//! - [`flatten`] / [`unflatten`] -- The bidirectional mapping
//! - [`canonicalize`] -- Recursive codepoint ordering of object keys

pub mod canonical;
pub mod error;
pub mod flatten;

pub use canonical::{canonicalize, is_canonical};
pub use error::{CodecError, CodecResult};
pub use flatten::{
    flatten, flatten_to_map, flatten_under, parse_entries, unflatten, unflatten_iter, FlatEntry,
};
