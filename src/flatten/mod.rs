//! Tree flattening for hocon-props.
//!
//! This module handles:
//! - The `ConfigNode` tree model (scalars, objects, lists)
//! - Flattening a tree into an ordered map of dotted/indexed paths

pub mod flattener;
pub mod types;

pub use flattener::{flatten, index_path, join_key};
pub use types::{ConfigNode, FlatMap, Object, Scalar};
