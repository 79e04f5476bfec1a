//! The [`OrderedTree`] handle.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::insert::{Demand, Insert, Spares, demand_for, insert_into};
use super::iter::{IntoIter, Iter};
use super::node::{Slot, TreeNode};
use super::remove::{Extreme, Removal, remove_from, take_extreme};
use super::DEFAULT_ORDER;
use crate::error::AllocationError;

// =============================================================================
// Insertion Outcome
// =============================================================================

/// The result of inserting a key into an [`OrderedTree`].
///
/// The tree never holds two keys that compare equal. Inserting a key that is
/// already present leaves the tree unchanged, hands the rejected key back and
/// exposes the stored one so the caller can decide what to do with either.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum Insertion<'a, K> {
    /// The key was new and is now stored.
    Inserted,
    /// An equal key was already stored.
    AlreadyPresent {
        /// The key held by the tree.
        existing: &'a K,
        /// The key passed to the insert, returned unchanged.
        rejected: K,
    },
}

impl<'a, K> Insertion<'a, K> {
    /// Returns `true` if the key was newly stored.
    #[inline]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    /// Returns the stored key that blocked the insertion, if any.
    #[inline]
    pub const fn existing(&self) -> Option<&'a K> {
        match self {
            Self::Inserted => None,
            Self::AlreadyPresent { existing, .. } => Some(existing),
        }
    }

    /// Returns the rejected key, if the insertion was a duplicate.
    #[inline]
    pub fn into_rejected(self) -> Option<K> {
        match self {
            Self::Inserted => None,
            Self::AlreadyPresent { rejected, .. } => Some(rejected),
        }
    }
}

// =============================================================================
// OrderedTree Definition
// =============================================================================

/// An ordered set of unique keys stored in a B-tree.
///
/// Every node other than the root holds between `ORDER` and `2 * ORDER`
/// keys, and every leaf sits at the same depth. Insertions split full nodes
/// on the way back up from the leaf; removals repair nodes that fall short by
/// rotating a key through the parent or by merging with a sibling.
///
/// `ORDER` defaults to 50. Small orders such as 2 make splits and merges
/// frequent, which is useful in tests.
///
/// # Time Complexity
///
/// | Operation          | Complexity              |
/// |--------------------|-------------------------|
/// | `find`/`contains`  | O(log N)                |
/// | `insert`           | O(log N)                |
/// | `remove`           | O(log N)                |
/// | `first`/`last`     | O(log N)                |
/// | `len`              | O(1)                    |
/// | `entries`          | O(N)                    |
/// | `height`           | O(log N)                |
/// | `is_subset_of`     | O(N log M)              |
///
/// # Examples
///
/// ```rust
/// use ordtree::tree::OrderedTree;
///
/// let mut tree: OrderedTree<i32, 2> = OrderedTree::new();
/// for key in [5, 1, 4, 2, 3] {
///     assert!(tree.insert(key).is_inserted());
/// }
///
/// assert_eq!(tree.entries(), 5);
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.find(&3), Some(&3));
///
/// let keys: Vec<i32> = tree.iter().copied().collect();
/// assert_eq!(keys, vec![1, 2, 3, 4, 5]);
/// ```
pub struct OrderedTree<K, const ORDER: usize = DEFAULT_ORDER> {
    root: Option<TreeNode<K, ORDER>>,
    length: usize,
}

static_assertions::assert_impl_all!(OrderedTree<i32>: Send, Sync);
static_assertions::assert_impl_all!(OrderedTree<String, 2>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(OrderedTree<std::rc::Rc<i32>>: Send, Sync);

impl<K, const ORDER: usize> OrderedTree<K, ORDER> {
    const ORDER_IS_VALID: () = assert!(ORDER >= 1, "ORDER must be at least 1");

    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = OrderedTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::ORDER_IS_VALID;
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the keys by walking every node.
    ///
    /// Always equal to [`len`](Self::len), which is maintained incrementally.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn entries(&self) -> usize {
        fn count<K, const ORDER: usize>(node: &TreeNode<K, ORDER>) -> usize {
            node.keys.len() + node.children.iter().map(count).sum::<usize>()
        }
        self.root.as_ref().map_or(0, count)
    }

    /// Returns the number of nodes on the path from the root to any leaf.
    ///
    /// An empty tree has height 0 and a tree whose root is a leaf has
    /// height 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, 2> = (1..=4).collect();
    /// assert_eq!(tree.height(), 1);
    ///
    /// assert!(tree.insert(5).is_inserted());
    /// assert_eq!(tree.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            height += 1;
            current = node.children.first();
        }
        height
    }

    /// Visits every key in ascending order.
    ///
    /// The traversal always starts from the smallest key; it cannot be
    /// resumed part way through. Use [`iter`](Self::iter) for a lazy
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32, 2> = [3, 1, 2].into_iter().collect();
    /// let mut seen = Vec::new();
    /// tree.apply(|key| seen.push(*key));
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// ```
    pub fn apply<F>(&self, mut visitor: F)
    where
        F: FnMut(&K),
    {
        fn visit<K, F, const ORDER: usize>(node: &TreeNode<K, ORDER>, visitor: &mut F)
        where
            F: FnMut(&K),
        {
            let mut children = node.children.iter();
            for key in &node.keys {
                if let Some(child) = children.next() {
                    visit(child, visitor);
                }
                visitor(key);
            }
            if let Some(child) = children.next() {
                visit(child, visitor);
            }
        }

        if let Some(root) = &self.root {
            visit(root, &mut visitor);
        }
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, ORDER> {
        Iter::new(self.root.as_ref(), self.length)
    }

    pub(super) const fn root_node(&self) -> Option<&TreeNode<K, ORDER>> {
        self.root.as_ref()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        if self.root.take().is_some() {
            log::trace!("ordered tree cleared, {} key(s) dropped", self.length);
        }
        self.length = 0;
    }
}

impl<K: Ord, const ORDER: usize> OrderedTree<K, ORDER> {
    /// Returns the stored key equal to `target`, if any.
    ///
    /// The target may be any borrowed form of the key type, as long as its
    /// ordering agrees with the key's.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let tree: OrderedTree<String> = ["apple", "pear"].map(String::from).into_iter().collect();
    /// assert_eq!(tree.find("pear"), Some(&"pear".to_string()));
    /// assert_eq!(tree.find("plum"), None);
    /// ```
    #[must_use]
    pub fn find<Q>(&self, target: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            match node.search(target) {
                Slot::Found(index) => return Some(&node.keys[index]),
                Slot::Absent(index) => current = node.children.get(index),
            }
        }
        None
    }

    /// Returns `true` if a key equal to `target` is stored.
    #[must_use]
    pub fn contains<Q>(&self, target: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(target).is_some()
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        let mut node = self.root.as_ref()?;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.keys.first()
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        let mut node = self.root.as_ref()?;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.keys.last()
    }

    /// Inserts a key.
    ///
    /// If an equal key is already stored the tree is left unchanged and the
    /// stored key is returned alongside the rejected one.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::{Insertion, OrderedTree};
    ///
    /// let mut tree: OrderedTree<i32> = OrderedTree::new();
    /// assert_eq!(tree.insert(7), Insertion::Inserted);
    /// assert_eq!(
    ///     tree.insert(7),
    ///     Insertion::AlreadyPresent { existing: &7, rejected: 7 }
    /// );
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Insertion<'_, K> {
        match self.place(key, &mut Spares::none()) {
            None => Insertion::Inserted,
            Some(rejected) => self.already_present(rejected),
        }
    }

    /// Inserts a key, reporting allocation failure instead of aborting.
    ///
    /// Every node the insertion could need is reserved before the tree is
    /// touched, so on error the tree is exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the nodes for the split chain cannot be
    /// reserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, 2> = OrderedTree::new();
    /// for key in 0..100 {
    ///     assert!(tree.try_insert(key).unwrap().is_inserted());
    /// }
    /// assert_eq!(tree.len(), 100);
    /// ```
    pub fn try_insert(&mut self, key: K) -> Result<Insertion<'_, K>, AllocationError> {
        let demand = match &self.root {
            // The first key needs a root leaf and nothing else.
            None => Demand {
                leaf: true,
                internal: 0,
            },
            Some(root) => match demand_for(root, &key) {
                Some(demand) => demand,
                None => return Ok(self.already_present(key)),
            },
        };
        let mut spares = Spares::try_reserve(demand)?;
        Ok(match self.place(key, &mut spares) {
            None => Insertion::Inserted,
            Some(rejected) => self.already_present(rejected),
        })
    }

    /// Inserts `key`, replacing and returning an equal key if one is stored.
    ///
    /// This is the operation a key/value layer uses to overwrite the value
    /// of an existing association.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::Association;
    /// use ordtree::tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<Association<&str, i32>> = OrderedTree::new();
    /// assert_eq!(tree.replace(Association::new("one", 1)), None);
    ///
    /// let previous = tree.replace(Association::new("one", 100));
    /// assert_eq!(previous.map(|association| *association.value()), Some(1));
    /// assert_eq!(tree.find(&"one").map(|association| *association.value()), Some(100));
    /// ```
    pub fn replace(&mut self, key: K) -> Option<K> {
        let mut current = self.root.as_mut();
        while let Some(node) = current {
            match node.search(&key) {
                Slot::Found(index) => return Some(std::mem::replace(&mut node.keys[index], key)),
                Slot::Absent(index) => current = node.children.get_mut(index),
            }
        }
        // The key was absent, so the insert cannot be rejected.
        let _ = self.place(key, &mut Spares::none());
        None
    }

    /// Removes and returns the key equal to `target`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, 2> = (1..=10).collect();
    /// assert_eq!(tree.remove(&4), Some(4));
    /// assert_eq!(tree.remove(&4), None);
    /// assert_eq!(tree.len(), 9);
    /// ```
    pub fn remove<Q>(&mut self, target: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match remove_from(self.root.as_mut()?, target, 1) {
            Removal::NotFound => None,
            Removal::Removed { key, underflow } => {
                self.length -= 1;
                if underflow {
                    self.shrink_root();
                }
                Some(key)
            }
        }
    }

    /// Removes and returns the smallest key.
    pub fn pop_first(&mut self) -> Option<K> {
        self.pop(Extreme::First)
    }

    /// Removes and returns the largest key.
    pub fn pop_last(&mut self) -> Option<K> {
        self.pop(Extreme::Last)
    }

    /// Keeps only the keys for which `predicate` returns `true`.
    ///
    /// # Complexity
    ///
    /// O(N log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, 2> = (1..=10).collect();
    /// tree.retain(|key| key % 3 == 0);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 6, 9]);
    /// ```
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&K) -> bool,
    {
        let keys = std::mem::take(self).into_iter();
        self.extend(keys.filter(|key| predicate(key)));
    }

    /// Returns `true` if every key of `self` is stored in `other`.
    ///
    /// The empty tree is a subset of every tree. The two trees may use
    /// different orders.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let small: OrderedTree<i32, 2> = [2, 4].into_iter().collect();
    /// let large: OrderedTree<i32, 3> = (1..=5).collect();
    /// assert!(small.is_subset_of(&large));
    /// assert!(!large.is_subset_of(&small));
    /// ```
    #[must_use]
    pub fn is_subset_of<const OTHER: usize>(&self, other: &OrderedTree<K, OTHER>) -> bool {
        self.len() <= other.len() && self.iter().all(|key| other.contains(key))
    }

    /// Returns `true` if every key of `other` is stored in `self`.
    #[must_use]
    pub fn is_superset_of<const OTHER: usize>(&self, other: &OrderedTree<K, OTHER>) -> bool {
        other.is_subset_of(self)
    }

    /// Returns `true` if no key is stored in both trees.
    #[must_use]
    pub fn is_disjoint<const OTHER: usize>(&self, other: &OrderedTree<K, OTHER>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|key| !other.contains(key))
        } else {
            other.iter().all(|key| !self.contains(key))
        }
    }

    /// Returns `true` if both trees store the same keys.
    ///
    /// Node layout is irrelevant: trees built from the same keys in a
    /// different order, or with a different `ORDER`, compare equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let ascending: OrderedTree<i32, 2> = (1..=20).collect();
    /// let descending: OrderedTree<i32, 5> = (1..=20).rev().collect();
    /// assert!(ascending.equals(&descending));
    /// ```
    #[must_use]
    pub fn equals<const OTHER: usize>(&self, other: &OrderedTree<K, OTHER>) -> bool {
        self.entries() == other.entries() && self.is_subset_of(other) && other.is_subset_of(self)
    }

    /// Stores `key` unless an equal key is present, in which case it is
    /// handed back. Nodes for splits are drawn from `spares`.
    fn place(&mut self, key: K, spares: &mut Spares<K, ORDER>) -> Option<K> {
        let Some(root) = self.root.as_mut() else {
            let mut leaf = spares.take_leaf();
            leaf.keys.push(key);
            self.root = Some(leaf);
            self.length = 1;
            return None;
        };

        match insert_into(root, key, spares) {
            Insert::Inserted => {}
            Insert::AlreadyPresent(rejected) => return Some(rejected),
            Insert::Overflow(median, sibling) => {
                let mut new_root = spares.take_internal();
                new_root.keys.push(median);
                new_root.children.extend(self.root.take());
                new_root.children.push(sibling);
                self.root = Some(new_root);
                log::trace!("root split, tree height now {}", self.height());
            }
        }
        self.length += 1;
        None
    }

    fn already_present(&self, rejected: K) -> Insertion<'_, K> {
        let Some(existing) = self.find(&rejected) else {
            unreachable!("a key rejected as a duplicate must be stored")
        };
        Insertion::AlreadyPresent { existing, rejected }
    }

    fn pop(&mut self, extreme: Extreme) -> Option<K> {
        let (key, underflow) = take_extreme(self.root.as_mut()?, extreme, 1)?;
        self.length -= 1;
        if underflow {
            self.shrink_root();
        }
        Some(key)
    }

    /// Drops a root left without keys: an internal root is replaced by its
    /// only child, a leaf root empties the tree.
    fn shrink_root(&mut self) {
        if self.root.as_ref().is_some_and(|root| root.keys.is_empty()) {
            self.root = self.root.take().and_then(|mut root| root.children.pop());
            log::trace!("root collapsed, tree height now {}", self.height());
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, const ORDER: usize> Default for OrderedTree<K, ORDER> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, const ORDER: usize> Clone for OrderedTree<K, ORDER> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
        }
    }
}

impl<K: Ord, const ORDER: usize> FromIterator<K> for OrderedTree<K, ORDER> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, const ORDER: usize> Extend<K> for OrderedTree<K, ORDER> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        let mut spares = Spares::none();
        for key in iter {
            let _ = self.place(key, &mut spares);
        }
    }
}

impl<K: Ord, const ORDER: usize, const N: usize> From<[K; N]> for OrderedTree<K, ORDER> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K, const ORDER: usize> IntoIterator for OrderedTree<K, ORDER> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.length)
    }
}

impl<'a, K, const ORDER: usize> IntoIterator for &'a OrderedTree<K, ORDER> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, ORDER>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, const ORDER: usize, const OTHER: usize> PartialEq<OrderedTree<K, OTHER>>
    for OrderedTree<K, ORDER>
{
    fn eq(&self, other: &OrderedTree<K, OTHER>) -> bool {
        self.equals(other)
    }
}

impl<K: Ord, const ORDER: usize> Eq for OrderedTree<K, ORDER> {}

impl<K: Hash, const ORDER: usize> Hash for OrderedTree<K, ORDER> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for key in self {
            key.hash(state);
        }
    }
}

impl<K: fmt::Debug, const ORDER: usize> fmt::Debug for OrderedTree<K, ORDER> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, const ORDER: usize> fmt::Display for OrderedTree<K, ORDER> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for key in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
