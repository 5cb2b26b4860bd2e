//! Diff engine for flatdiff.
//!
//! Computes the ordered list of path-addressed operations that turns one
//! value into another. Objects are compared key by key in sorted order,
//! arrays index by index; equal subtrees produce nothing.
//!
//! # Key Types
//!
//! - [`Patch`] / [`DiffOperation`] -- The operation list and its entries
//! - [`DiffOptions`] -- Array handling switches, loadable from TOML
//! - [`diff`] / [`diff_with_options`] -- The entry points

pub mod engine;
pub mod error;
pub mod operation;
pub mod options;

pub use engine::{diff, diff_with_options};
pub use error::{DiffError, DiffResult};
pub use operation::{DiffOperation, OperationKind, Patch};
pub use options::DiffOptions;
