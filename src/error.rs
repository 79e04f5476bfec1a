//! Error types for the ordered tree.
//!
//! The tree reports ordinary outcomes (absent keys, duplicate inserts) as
//! return values. The types in this module cover the two remaining cases:
//! an allocation that could not be satisfied during a fallible insert, and
//! a structural rule found broken by [`OrderedTree::check_invariants`].
//!
//! [`OrderedTree::check_invariants`]: crate::tree::OrderedTree::check_invariants

use std::collections::TryReserveError;

/// Represents a failure to reserve the nodes an insertion needs.
///
/// Returned by [`OrderedTree::try_insert`]. When this error is produced the
/// tree has not been modified.
///
/// [`OrderedTree::try_insert`]: crate::tree::OrderedTree::try_insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationError {
    /// Number of nodes the insertion would have created.
    pub nodes_requested: usize,
    source: TryReserveError,
}

impl AllocationError {
    pub(crate) const fn new(nodes_requested: usize, source: TryReserveError) -> Self {
        Self {
            nodes_requested,
            source,
        }
    }
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "failed to reserve {} node(s) for insertion: {}",
            self.nodes_requested, self.source
        )
    }
}

impl std::error::Error for AllocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Describes a structural rule that a tree does not satisfy.
///
/// Depths are counted from the root, which sits at depth 0. A well-formed
/// tree never produces any of these; they exist so that tests and callers
/// layering their own structures on top can verify the tree cheaply.
///
/// # Examples
///
/// ```rust
/// use ordtree::error::InvariantViolation;
///
/// let violation = InvariantViolation::Underfull { depth: 2, count: 1, minimum: 2 };
/// assert_eq!(
///     format!("{violation}"),
///     "node at depth 2 holds 1 key(s), below the minimum of 2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The tree has a root node that holds no keys.
    EmptyRoot,
    /// A non-root node holds fewer than `ORDER` keys.
    Underfull {
        /// Depth of the offending node.
        depth: usize,
        /// Keys held by the node.
        count: usize,
        /// Minimum number of keys required.
        minimum: usize,
    },
    /// A node holds more than `2 * ORDER` keys.
    Overfull {
        /// Depth of the offending node.
        depth: usize,
        /// Keys held by the node.
        count: usize,
        /// Maximum number of keys allowed.
        maximum: usize,
    },
    /// An internal node does not have exactly one more child than keys.
    ChildCountMismatch {
        /// Depth of the offending node.
        depth: usize,
        /// Keys held by the node.
        keys: usize,
        /// Children held by the node.
        children: usize,
    },
    /// Keys are not strictly ascending, either inside a node or across a
    /// separator.
    OutOfOrder {
        /// Depth at which the ordering breaks.
        depth: usize,
    },
    /// Two leaves sit at different depths.
    UnevenLeaves {
        /// Depth of the first leaf encountered.
        expected: usize,
        /// Depth of the leaf that disagrees.
        found: usize,
    },
    /// The cached length does not match the number of stored keys.
    LengthMismatch {
        /// The cached length.
        cached: usize,
        /// The number of keys found by traversal.
        counted: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRoot => write!(formatter, "root node holds no keys"),
            Self::Underfull {
                depth,
                count,
                minimum,
            } => write!(
                formatter,
                "node at depth {depth} holds {count} key(s), below the minimum of {minimum}"
            ),
            Self::Overfull {
                depth,
                count,
                maximum,
            } => write!(
                formatter,
                "node at depth {depth} holds {count} key(s), above the maximum of {maximum}"
            ),
            Self::ChildCountMismatch {
                depth,
                keys,
                children,
            } => write!(
                formatter,
                "node at depth {depth} has {keys} key(s) but {children} child(ren)"
            ),
            Self::OutOfOrder { depth } => {
                write!(formatter, "keys are not strictly ascending at depth {depth}")
            }
            Self::UnevenLeaves { expected, found } => write!(
                formatter,
                "leaf found at depth {found}, other leaves are at depth {expected}"
            ),
            Self::LengthMismatch { cached, counted } => write!(
                formatter,
                "cached length {cached} does not match {counted} stored key(s)"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reserve_error() -> TryReserveError {
        let mut buffer: Vec<u64> = Vec::new();
        match buffer.try_reserve_exact(usize::MAX) {
            Err(error) => error,
            Ok(()) => unreachable!("reserving usize::MAX elements cannot succeed"),
        }
    }

    #[rstest]
    fn test_allocation_error_display() {
        let error = AllocationError::new(3, reserve_error());
        let message = format!("{error}");
        assert!(message.starts_with("failed to reserve 3 node(s) for insertion: "));
    }

    #[rstest]
    fn test_allocation_error_exposes_source() {
        use std::error::Error;

        let error = AllocationError::new(1, reserve_error());
        assert!(error.source().is_some());
    }

    #[rstest]
    #[case(InvariantViolation::EmptyRoot, "root node holds no keys")]
    #[case(
        InvariantViolation::Overfull { depth: 0, count: 5, maximum: 4 },
        "node at depth 0 holds 5 key(s), above the maximum of 4"
    )]
    #[case(
        InvariantViolation::ChildCountMismatch { depth: 1, keys: 2, children: 2 },
        "node at depth 1 has 2 key(s) but 2 child(ren)"
    )]
    #[case(
        InvariantViolation::OutOfOrder { depth: 3 },
        "keys are not strictly ascending at depth 3"
    )]
    #[case(
        InvariantViolation::UnevenLeaves { expected: 2, found: 1 },
        "leaf found at depth 1, other leaves are at depth 2"
    )]
    #[case(
        InvariantViolation::LengthMismatch { cached: 4, counted: 3 },
        "cached length 4 does not match 3 stored key(s)"
    )]
    fn test_invariant_violation_display(
        #[case] violation: InvariantViolation,
        #[case] expected: &str,
    ) {
        assert_eq!(format!("{violation}"), expected);
    }
}
