//! # ordtree
//!
//! An in-memory ordered set of unique keys backed by a B-tree.
//!
//! ## Overview
//!
//! - **[`OrderedTree`](tree::OrderedTree)**: the tree itself, generic over
//!   the key type and a const `ORDER` (default 50) that bounds node sizes
//! - **[`Association`]**: a key/value pair ordered by key, for using the
//!   tree as an ordered map
//! - **[`error`]**: allocation failures from fallible inserts and the
//!   structural violations reported by `check_invariants`
//!
//! ## Feature Flags
//!
//! - `serde`: serialize a tree as the ascending sequence of its keys
//!
//! ## Example
//!
//! ```rust
//! use ordtree::prelude::*;
//!
//! let mut tree: OrderedTree<u32, 2> = (1..=8).collect();
//! assert_eq!(tree.height(), 2);
//!
//! assert!(tree.insert(9).is_inserted());
//! assert_eq!(tree.remove(&1), Some(1));
//!
//! let subset: OrderedTree<u32> = [2, 3].into();
//! assert!(subset.is_subset_of(&tree));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::association::Association;
    pub use crate::error::{AllocationError, InvariantViolation};
    pub use crate::tree::{DEFAULT_ORDER, Insertion, OrderedTree};
}

pub mod association;
pub mod error;
pub mod tree;

pub use association::Association;
