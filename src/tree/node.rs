//! Fixed-capacity multi-key node.
//!
//! A node holds between `ORDER` and `2 * ORDER` keys (the root may hold
//! fewer) and, when internal, exactly one more child than keys. Children are
//! owned inline, so splitting, rotating and merging move nodes by value
//! instead of rewiring pointers.
//!
//! Storage for every node is reserved up front with one spare key slot and
//! one spare child slot. Insertion into a full node first lands in that spare
//! slot and is then split, so neither path ever grows a vector after the node
//! has been created.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::mem;

/// Result of searching a single node for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Slot {
    /// The key is stored at this index.
    Found(usize),
    /// The key is absent from this node; the index is both the insertion
    /// position and the child to descend into.
    Absent(usize),
}

pub(super) struct TreeNode<K, const ORDER: usize> {
    pub(super) keys: Vec<K>,
    pub(super) children: Vec<Self>,
}

impl<K, const ORDER: usize> TreeNode<K, ORDER> {
    /// Fewest keys a non-root node may hold.
    pub(super) const MINIMUM: usize = ORDER;
    /// Most keys any node may hold between operations.
    pub(super) const MAXIMUM: usize = 2 * ORDER;

    const KEY_SLOTS: usize = Self::MAXIMUM + 1;
    const CHILD_SLOTS: usize = Self::MAXIMUM + 2;

    pub(super) fn leaf() -> Self {
        Self {
            keys: Vec::with_capacity(Self::KEY_SLOTS),
            children: Vec::new(),
        }
    }

    pub(super) fn internal() -> Self {
        Self {
            keys: Vec::with_capacity(Self::KEY_SLOTS),
            children: Vec::with_capacity(Self::CHILD_SLOTS),
        }
    }

    pub(super) fn try_leaf() -> Result<Self, TryReserveError> {
        let mut keys = Vec::new();
        keys.try_reserve_exact(Self::KEY_SLOTS)?;
        Ok(Self {
            keys,
            children: Vec::new(),
        })
    }

    pub(super) fn try_internal() -> Result<Self, TryReserveError> {
        let mut keys = Vec::new();
        keys.try_reserve_exact(Self::KEY_SLOTS)?;
        let mut children = Vec::new();
        children.try_reserve_exact(Self::CHILD_SLOTS)?;
        Ok(Self { keys, children })
    }

    #[inline]
    pub(super) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.keys.len() >= Self::MAXIMUM
    }

    /// Returns the smallest index `r` such that `target <= keys[r]`, or the
    /// key count when `target` exceeds every key.
    pub(super) fn locate<Q>(&self, target: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys
            .partition_point(|key| key.borrow().cmp(target) == Ordering::Less)
    }

    pub(super) fn search<Q>(&self, target: &Q) -> Slot
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.locate(target);
        match self.keys.get(index) {
            Some(key) if key.borrow().cmp(target) == Ordering::Equal => Slot::Found(index),
            _ => Slot::Absent(index),
        }
    }

    /// Inserts `key` at `index` with `right` as the child that follows it.
    ///
    /// The node must have room, or be about to be split.
    pub(super) fn absorb(&mut self, index: usize, key: K, right: Option<Self>) {
        self.keys.insert(index, key);
        if let Some(child) = right {
            self.children.insert(index + 1, child);
        }
    }

    /// Inserts into a full node and splits it around the median.
    ///
    /// Keys above the median (and the children between them) move into
    /// `sibling`, which must be empty and of the same kind as `self`. Both
    /// halves end up with exactly `ORDER` keys; the median is returned for
    /// the parent to absorb alongside `sibling`.
    pub(super) fn split_insert(
        &mut self,
        index: usize,
        key: K,
        right: Option<Self>,
        mut sibling: Self,
    ) -> (K, Self) {
        debug_assert_eq!(self.keys.len(), Self::MAXIMUM);
        debug_assert!(sibling.keys.is_empty() && sibling.children.is_empty());

        self.absorb(index, key, right);
        sibling.keys.extend(self.keys.drain(ORDER + 1..));
        if !self.is_leaf() {
            sibling.children.extend(self.children.drain(ORDER + 1..));
        }
        let median = self.keys.remove(ORDER);
        (median, sibling)
    }

    /// Moves the last key of the left sibling of `children[index]` up into
    /// the separator, and the old separator down into `children[index]`.
    pub(super) fn rotate_from_left(&mut self, index: usize) {
        let (before, after) = self.children.split_at_mut(index);
        let (Some(donor), Some(receiver)) = (before.last_mut(), after.first_mut()) else {
            return;
        };
        if let Some(key) = donor.keys.pop() {
            let separator = mem::replace(&mut self.keys[index - 1], key);
            receiver.keys.insert(0, separator);
        }
        if let Some(child) = donor.children.pop() {
            receiver.children.insert(0, child);
        }
    }

    /// Moves the first key of the right sibling of `children[index]` up into
    /// the separator, and the old separator down into `children[index]`.
    pub(super) fn rotate_from_right(&mut self, index: usize) {
        let (before, after) = self.children.split_at_mut(index + 1);
        let (Some(receiver), Some(donor)) = (before.last_mut(), after.first_mut()) else {
            return;
        };
        if donor.keys.is_empty() {
            return;
        }
        let key = donor.keys.remove(0);
        let separator = mem::replace(&mut self.keys[index], key);
        receiver.keys.push(separator);
        if !donor.is_leaf() {
            receiver.children.push(donor.children.remove(0));
        }
    }

    /// Folds `children[index + 1]` and the separator between them into
    /// `children[index]`.
    pub(super) fn merge_children(&mut self, index: usize) {
        let right = self.children.remove(index + 1);
        let separator = self.keys.remove(index);
        let left = &mut self.children[index];
        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);
    }

    /// Restores the minimum key count of `children[index]`.
    ///
    /// Rotates from an adjacent sibling holding more than the minimum,
    /// preferring the left one; otherwise merges with a sibling. A merge
    /// removes one key from `self`, which may leave `self` under its own
    /// minimum for the caller to deal with.
    pub(super) fn rebalance_child(&mut self, index: usize) {
        let left_is_rich = index > 0 && self.children[index - 1].keys.len() > Self::MINIMUM;
        let right_is_rich = self
            .children
            .get(index + 1)
            .is_some_and(|sibling| sibling.keys.len() > Self::MINIMUM);

        if left_is_rich {
            self.rotate_from_left(index);
        } else if right_is_rich {
            self.rotate_from_right(index);
        } else if index > 0 {
            self.merge_children(index - 1);
        } else if index + 1 < self.children.len() {
            self.merge_children(index);
        }
    }
}

impl<K: Clone, const ORDER: usize> Clone for TreeNode<K, ORDER> {
    fn clone(&self) -> Self {
        let mut node = if self.is_leaf() {
            Self::leaf()
        } else {
            Self::internal()
        };
        node.keys.extend(self.keys.iter().cloned());
        node.children.extend(self.children.iter().cloned());
        node
    }
}
