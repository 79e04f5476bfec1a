//! Recursive insertion with split propagation.

use super::node::{Slot, TreeNode};
use crate::error::AllocationError;

/// Outcome of inserting into a subtree.
pub(super) enum Insert<K, const ORDER: usize> {
    /// The key was stored and the subtree absorbed it.
    Inserted,
    /// An equal key is already stored; the rejected key is handed back.
    AlreadyPresent(K),
    /// The subtree root split. The median and the new right sibling must be
    /// absorbed by the caller.
    Overflow(K, TreeNode<K, ORDER>),
}

/// Nodes set aside before an insertion so that splitting never allocates.
///
/// An empty pool allocates on demand, which is what the infallible insert
/// path uses.
pub(super) struct Spares<K, const ORDER: usize> {
    leaf: Option<TreeNode<K, ORDER>>,
    internal: Vec<TreeNode<K, ORDER>>,
}

impl<K, const ORDER: usize> Spares<K, ORDER> {
    pub(super) const fn none() -> Self {
        Self {
            leaf: None,
            internal: Vec::new(),
        }
    }

    pub(super) fn try_reserve(demand: Demand) -> Result<Self, AllocationError> {
        let nodes = demand.nodes();
        let to_error = |source| AllocationError::new(nodes, source);

        let leaf = if demand.leaf {
            Some(TreeNode::try_leaf().map_err(to_error)?)
        } else {
            None
        };
        let mut internal = Vec::new();
        internal
            .try_reserve_exact(demand.internal)
            .map_err(to_error)?;
        for _ in 0..demand.internal {
            internal.push(TreeNode::try_internal().map_err(to_error)?);
        }
        Ok(Self { leaf, internal })
    }

    pub(super) fn take_leaf(&mut self) -> TreeNode<K, ORDER> {
        self.leaf.take().unwrap_or_else(TreeNode::leaf)
    }

    pub(super) fn take_internal(&mut self) -> TreeNode<K, ORDER> {
        self.internal.pop().unwrap_or_else(TreeNode::internal)
    }
}

/// Number of nodes an insertion will create.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct Demand {
    /// A leaf splits.
    pub(super) leaf: bool,
    /// Internal nodes created, counting a new root.
    pub(super) internal: usize,
}

impl Demand {
    pub(super) fn nodes(self) -> usize {
        self.internal + usize::from(self.leaf)
    }
}

/// Works out which nodes inserting `key` below `root` would allocate,
/// without touching the tree. Returns `None` when `key` is already stored.
///
/// Only the run of full nodes directly above the target leaf splits; if that
/// run reaches the root, a new root is needed as well.
pub(super) fn demand_for<K: Ord, const ORDER: usize>(
    root: &TreeNode<K, ORDER>,
    key: &K,
) -> Option<Demand> {
    let mut node = root;
    let mut depth: usize = 0;
    let mut full_run: usize = 0;
    loop {
        depth += 1;
        let index = match node.search(key) {
            Slot::Found(_) => return None,
            Slot::Absent(index) => index,
        };
        full_run = if node.is_full() { full_run + 1 } else { 0 };
        match node.children.get(index) {
            Some(child) => node = child,
            None => break,
        }
    }
    Some(Demand {
        leaf: full_run > 0,
        internal: full_run.saturating_sub(1) + usize::from(full_run == depth),
    })
}

/// Inserts `key` into the subtree rooted at `node`.
pub(super) fn insert_into<K: Ord, const ORDER: usize>(
    node: &mut TreeNode<K, ORDER>,
    key: K,
    spares: &mut Spares<K, ORDER>,
) -> Insert<K, ORDER> {
    let index = match node.search(&key) {
        Slot::Found(_) => return Insert::AlreadyPresent(key),
        Slot::Absent(index) => index,
    };

    // Passing below a leaf: the key itself overflows into this node.
    let (key, right) = if node.is_leaf() {
        (key, None)
    } else {
        match insert_into(&mut node.children[index], key, spares) {
            Insert::Overflow(median, sibling) => (median, Some(sibling)),
            settled => return settled,
        }
    };

    if node.is_full() {
        let sibling = if node.is_leaf() {
            spares.take_leaf()
        } else {
            spares.take_internal()
        };
        let (median, sibling) = node.split_insert(index, key, right, sibling);
        Insert::Overflow(median, sibling)
    } else {
        node.absorb(index, key, right);
        Insert::Inserted
    }
}
