//! In-order iterators over an [`OrderedTree`](super::OrderedTree).

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::TreeNode;

/// Frames kept inline before the iterator's stack spills to the heap.
/// With the default `ORDER` this covers trees far larger than memory.
const INLINE_DEPTH: usize = 8;

/// A borrowing iterator over the keys of an [`OrderedTree`] in ascending
/// order.
///
/// Created by [`OrderedTree::iter`].
///
/// [`OrderedTree`]: super::OrderedTree
/// [`OrderedTree::iter`]: super::OrderedTree::iter
pub struct Iter<'a, K, const ORDER: usize> {
    /// Path from the root to the current node, each paired with the index of
    /// the next key to yield from it.
    stack: SmallVec<[(&'a TreeNode<K, ORDER>, usize); INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, K, const ORDER: usize> Iter<'a, K, ORDER> {
    pub(super) fn new(root: Option<&'a TreeNode<K, ORDER>>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        if let Some(root) = root {
            iterator.push_leftmost(root);
        }
        iterator
    }

    fn push_leftmost(&mut self, mut node: &'a TreeNode<K, ORDER>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K, const ORDER: usize> Iterator for Iter<'a, K, ORDER> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (node, index) = *frame;
            if index < node.keys.len() {
                frame.1 += 1;
                if let Some(child) = node.children.get(index + 1) {
                    self.push_leftmost(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.keys[index]);
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, const ORDER: usize> ExactSizeIterator for Iter<'_, K, ORDER> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, const ORDER: usize> FusedIterator for Iter<'_, K, ORDER> {}

impl<K, const ORDER: usize> Clone for Iter<'_, K, ORDER> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the keys of an [`OrderedTree`] in ascending
/// order.
///
/// Created by the [`IntoIterator`] implementation of [`OrderedTree`].
///
/// [`OrderedTree`]: super::OrderedTree
pub struct IntoIter<K> {
    keys: std::vec::IntoIter<K>,
}

impl<K> IntoIter<K> {
    pub(super) fn new<const ORDER: usize>(root: Option<TreeNode<K, ORDER>>, length: usize) -> Self {
        let mut keys = Vec::with_capacity(length);
        if let Some(root) = root {
            drain_in_order(root, &mut keys);
        }
        Self {
            keys: keys.into_iter(),
        }
    }
}

fn drain_in_order<K, const ORDER: usize>(node: TreeNode<K, ORDER>, keys: &mut Vec<K>) {
    let mut children = node.children.into_iter();
    for key in node.keys {
        if let Some(child) = children.next() {
            drain_in_order(child, keys);
        }
        keys.push(key);
    }
    if let Some(child) = children.next() {
        drain_in_order(child, keys);
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}
