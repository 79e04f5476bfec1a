//! Structural self-check for [`OrderedTree`].

use super::OrderedTree;
use super::node::TreeNode;
use crate::error::InvariantViolation;

impl<K: Ord, const ORDER: usize> OrderedTree<K, ORDER> {
    /// Verifies every structural rule of the tree.
    ///
    /// Checks that keys are strictly ascending both inside nodes and across
    /// separators, that every non-root node holds between `ORDER` and
    /// `2 * ORDER` keys, that internal nodes have one more child than keys,
    /// that all leaves share a depth, and that [`len`](Self::len) matches the
    /// stored keys.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32, 2> = (0..100).collect();
    /// tree.retain(|key| key % 7 != 0);
    /// assert!(tree.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let counted = match self.root_node() {
            None => 0,
            Some(root) if root.keys.is_empty() => return Err(InvariantViolation::EmptyRoot),
            Some(root) => {
                let mut walk = Walk {
                    leaf_depth: None,
                    counted: 0,
                };
                walk.visit(root, 0, None, None)?;
                walk.counted
            }
        };
        if counted == self.len() {
            Ok(())
        } else {
            Err(InvariantViolation::LengthMismatch {
                cached: self.len(),
                counted,
            })
        }
    }
}

struct Walk {
    leaf_depth: Option<usize>,
    counted: usize,
}

impl Walk {
    fn visit<K: Ord, const ORDER: usize>(
        &mut self,
        node: &TreeNode<K, ORDER>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation> {
        let count = node.keys.len();
        if depth > 0 && count < TreeNode::<K, ORDER>::MINIMUM {
            return Err(InvariantViolation::Underfull {
                depth,
                count,
                minimum: TreeNode::<K, ORDER>::MINIMUM,
            });
        }
        if count > TreeNode::<K, ORDER>::MAXIMUM {
            return Err(InvariantViolation::Overfull {
                depth,
                count,
                maximum: TreeNode::<K, ORDER>::MAXIMUM,
            });
        }

        let ascending = node.keys.windows(2).all(|pair| pair[0] < pair[1]);
        let above_lower = match (lower, node.keys.first()) {
            (Some(bound), Some(first)) => bound < first,
            _ => true,
        };
        let below_upper = match (upper, node.keys.last()) {
            (Some(bound), Some(last)) => last < bound,
            _ => true,
        };
        if !(ascending && above_lower && below_upper) {
            return Err(InvariantViolation::OutOfOrder { depth });
        }
        self.counted += count;

        if node.is_leaf() {
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(InvariantViolation::UnevenLeaves {
                    expected,
                    found: depth,
                }),
            };
        }

        if node.children.len() != count + 1 {
            return Err(InvariantViolation::ChildCountMismatch {
                depth,
                keys: count,
                children: node.children.len(),
            });
        }
        for (index, child) in node.children.iter().enumerate() {
            let child_lower = if index == 0 {
                lower
            } else {
                node.keys.get(index - 1)
            };
            let child_upper = node.keys.get(index).or(upper);
            self.visit(child, depth + 1, child_lower, child_upper)?;
        }
        Ok(())
    }
}
