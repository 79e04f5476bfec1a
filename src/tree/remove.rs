//! Recursive removal with underflow propagation.
//!
//! Every removal ends in a leaf. A key found in an internal node is replaced
//! by its in-order predecessor, which is then taken out of the rightmost leaf
//! of the left subtree. On the way back up, each parent repairs a child that
//! fell below the minimum by rotating from a sibling or merging with one;
//! a merge may in turn leave the parent short, which its own caller repairs.

use std::borrow::Borrow;
use std::mem;

use super::node::{Slot, TreeNode};

/// Outcome of removing from a subtree.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Removal<K> {
    NotFound,
    Removed {
        key: K,
        /// The subtree root now holds fewer keys than its minimum.
        underflow: bool,
    },
}

/// Which end of a subtree to take a key from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Extreme {
    First,
    Last,
}

/// Removes `target` from the subtree rooted at `node`.
///
/// `minimum` is the key count below which `node` reports underflow: `ORDER`
/// for ordinary nodes, `1` for the root.
pub(super) fn remove_from<K, Q, const ORDER: usize>(
    node: &mut TreeNode<K, ORDER>,
    target: &Q,
    minimum: usize,
) -> Removal<K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    match node.search(target) {
        Slot::Absent(_) if node.is_leaf() => Removal::NotFound,
        Slot::Found(index) if node.is_leaf() => {
            let key = node.keys.remove(index);
            Removal::Removed {
                key,
                underflow: node.keys.len() < minimum,
            }
        }
        Slot::Found(index) => {
            let Some((predecessor, child_underflow)) = take_extreme(
                &mut node.children[index],
                Extreme::Last,
                TreeNode::<K, ORDER>::MINIMUM,
            ) else {
                unreachable!("children of an internal node always hold keys")
            };
            let key = mem::replace(&mut node.keys[index], predecessor);
            settle(node, index, key, child_underflow, minimum)
        }
        Slot::Absent(index) => {
            match remove_from(
                &mut node.children[index],
                target,
                TreeNode::<K, ORDER>::MINIMUM,
            ) {
                Removal::NotFound => Removal::NotFound,
                Removal::Removed { key, underflow } => {
                    settle(node, index, key, underflow, minimum)
                }
            }
        }
    }
}

/// Removes the smallest or largest key of the subtree rooted at `node`,
/// returning it with the node's underflow flag.
pub(super) fn take_extreme<K, const ORDER: usize>(
    node: &mut TreeNode<K, ORDER>,
    extreme: Extreme,
    minimum: usize,
) -> Option<(K, bool)> {
    if node.is_leaf() {
        let key = match extreme {
            Extreme::First if !node.keys.is_empty() => node.keys.remove(0),
            Extreme::First => return None,
            Extreme::Last => node.keys.pop()?,
        };
        return Some((key, node.keys.len() < minimum));
    }

    let index = match extreme {
        Extreme::First => 0,
        Extreme::Last => node.children.len() - 1,
    };
    let (key, child_underflow) = take_extreme(
        &mut node.children[index],
        extreme,
        TreeNode::<K, ORDER>::MINIMUM,
    )?;
    if child_underflow {
        node.rebalance_child(index);
    }
    Some((key, node.keys.len() < minimum))
}

fn settle<K, const ORDER: usize>(
    node: &mut TreeNode<K, ORDER>,
    index: usize,
    key: K,
    child_underflow: bool,
    minimum: usize,
) -> Removal<K> {
    if child_underflow {
        node.rebalance_child(index);
    }
    Removal::Removed {
        key,
        underflow: node.keys.len() < minimum,
    }
}
