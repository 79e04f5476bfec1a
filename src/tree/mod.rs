//! Order-preserving B-tree container.
//!
//! This module provides [`OrderedTree`], a mutable ordered set of unique
//! keys stored in a classic B-tree.
//!
//! # Overview
//!
//! Each node holds a sorted run of keys and, when internal, one more child
//! than keys. For a tree of order `ORDER`:
//!
//! 1. Every node other than the root holds between `ORDER` and `2 * ORDER` keys
//! 2. The root holds between 1 and `2 * ORDER` keys; an empty tree has no root
//! 3. All leaves are at the same depth
//! 4. Keys are strictly ascending in an in-order walk
//!
//! Insertion descends to a leaf and splits full nodes on the way back up; a
//! split of the root adds a level. Removal always takes a key out of a leaf
//! (an internal key is first replaced by its in-order predecessor) and
//! repairs short nodes on the way back up by rotating through the parent or
//! merging siblings; a root left without keys is dropped, removing a level.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::tree::OrderedTree;
//!
//! let mut tree: OrderedTree<i32, 2> = OrderedTree::new();
//! for key in 1..=8 {
//!     assert!(tree.insert(key).is_inserted());
//! }
//! assert_eq!(tree.height(), 2);
//!
//! assert_eq!(tree.remove(&6), Some(6));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 7, 8]);
//! ```

mod insert;
mod iter;
mod node;
mod ordered_tree;
mod remove;
mod validate;

#[cfg(feature = "serde")]
mod serde;

pub use iter::IntoIter;
pub use iter::Iter;
pub use ordered_tree::Insertion;
pub use ordered_tree::OrderedTree;

/// The order used when none is given: non-root nodes hold between 50 and
/// 100 keys.
pub const DEFAULT_ORDER: usize = 50;
