//! Key/value pairs ordered by key alone.
//!
//! An [`OrderedTree`](crate::tree::OrderedTree) stores bare keys. Storing
//! [`Association`]s instead turns it into an ordered map: two associations
//! compare equal whenever their keys do, so the tree's uniqueness rule
//! applies to keys and the value rides along.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::Association;
//! use ordtree::tree::OrderedTree;
//!
//! let mut scores: OrderedTree<Association<&str, u32>> = OrderedTree::new();
//! assert!(scores.insert(Association::new("bob", 7)).is_inserted());
//! assert!(scores.insert(Association::new("alice", 9)).is_inserted());
//!
//! // Same key, different value: rejected as a duplicate.
//! assert!(!scores.insert(Association::new("bob", 0)).is_inserted());
//!
//! let names: Vec<&str> = scores.iter().map(|entry| *entry.key()).collect();
//! assert_eq!(names, vec!["alice", "bob"]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// A key paired with a value, compared and ordered by the key only.
#[derive(Clone, Copy, Default)]
pub struct Association<K, V> {
    key: K,
    value: V,
}

impl<K, V> Association<K, V> {
    /// Pairs `key` with `value`.
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value mutably.
    ///
    /// The key stays immutable: changing it in place could break the order
    /// of the tree that holds the association.
    #[inline]
    pub const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Splits the association into its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Association<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Association<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Association<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for Association<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> Borrow<K> for Association<K, V> {
    fn borrow(&self) -> &K {
        &self.key
    }
}

impl<K, V> From<(K, V)> for Association<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Association<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}: {:?}", self.key, self.value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Association<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.key, self.value)
    }
}
