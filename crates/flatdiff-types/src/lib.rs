//! Foundation types for flatdiff.
//!
//! This crate provides the tree value model and the path notation shared by
//! every other flatdiff crate.
//!
//! # Key Types
//!
//! - [`Value`] -- Recursive tree value with a native [`Value::Absent`] slot
//! - [`Path`] / [`Segment`] -- Typed address of a node inside a [`Value`]
//! - [`ContainerKind`] -- Object-or-array discriminator used by path markers
//! - [`ABSENT_SENTINEL`] -- String token standing in for `Absent` on the wire

pub mod absent;
pub mod error;
pub mod path;
pub mod value;

pub use absent::{contains_absent, restore_absent, substitute_absent, ABSENT_SENTINEL};
pub use error::PathError;
pub use path::{ContainerKind, Path, Segment};
pub use value::{Map, Number, Value, ValueKind};
