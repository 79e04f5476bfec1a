//! Unit tests for OrderedTree.
//!
//! The small-order scenarios below use ORDER = 2, where every non-root node
//! holds between 2 and 4 keys, so splits and merges happen after a handful
//! of operations.

use ordtree::Association;
use ordtree::error::InvariantViolation;
use ordtree::tree::{DEFAULT_ORDER, Insertion, OrderedTree};
use rstest::rstest;
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

type SmallTree = OrderedTree<i32, 2>;

fn keys<const ORDER: usize>(tree: &OrderedTree<i32, ORDER>) -> Vec<i32> {
    tree.iter().copied().collect()
}

fn applied<const ORDER: usize>(tree: &OrderedTree<i32, ORDER>) -> Vec<i32> {
    let mut seen = Vec::new();
    tree.apply(|key| seen.push(*key));
    seen
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_tree() {
    let tree: OrderedTree<i32> = OrderedTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.entries(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.find(&1), None);
    assert_eq!(applied(&tree), Vec::<i32>::new());
}

#[rstest]
fn test_default_creates_empty_tree() {
    let tree: SmallTree = OrderedTree::default();
    assert!(tree.is_empty());
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[rstest]
fn test_default_order_is_fifty() {
    assert_eq!(DEFAULT_ORDER, 50);

    let tree: OrderedTree<i32> = (0..100).collect();
    assert_eq!(tree.height(), 1);

    let tree: OrderedTree<i32> = (0..101).collect();
    assert_eq!(tree.height(), 2);
}

// =============================================================================
// Insert and Find Tests
// =============================================================================

#[rstest]
#[case(&[1, 2, 3, 4], 1)]
#[case(&[1, 2, 3, 4, 5], 2)]
#[case(&[1, 2, 3, 4, 5, 6, 7, 8], 2)]
#[case(&[], 0)]
fn test_height_after_inserts(#[case] inserted: &[i32], #[case] expected: usize) {
    let tree: SmallTree = inserted.iter().copied().collect();
    assert_eq!(tree.height(), expected);
    assert_eq!(tree.entries(), inserted.len());
}

#[rstest]
fn test_find_returns_stored_key() {
    let tree: SmallTree = [1, 2, 3, 4, 5].into();
    for key in 1..=5 {
        assert_eq!(tree.find(&key), Some(&key));
    }
    assert_eq!(tree.find(&0), None);
    assert_eq!(tree.find(&6), None);
}

#[rstest]
fn test_insert_duplicate_is_rejected() {
    let mut tree: SmallTree = [10, 20, 30].into();
    assert_eq!(
        tree.insert(20),
        Insertion::AlreadyPresent {
            existing: &20,
            rejected: 20
        }
    );
    assert_eq!(tree.len(), 3);
    assert_eq!(keys(&tree), vec![10, 20, 30]);
}

#[rstest]
fn test_insert_in_descending_order() {
    let tree: SmallTree = (1..=100).rev().collect();
    assert_eq!(keys(&tree), (1..=100).collect::<Vec<_>>());
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[rstest]
fn test_insert_interleaved_keys() {
    let mut tree: SmallTree = OrderedTree::new();
    for key in (0..1000).map(|value| (value * 7919) % 1000) {
        assert!(tree.insert(key).is_inserted());
    }
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.check_invariants(), Ok(()));
    assert_eq!(keys(&tree), (0..1000).collect::<Vec<_>>());
}

#[rstest]
fn test_find_by_borrowed_form() {
    let tree: OrderedTree<String, 2> = ["delta", "alpha", "charlie", "bravo", "echo"]
        .map(String::from)
        .into();
    assert_eq!(tree.find("charlie").map(String::as_str), Some("charlie"));
    assert!(tree.contains("echo"));
    assert!(!tree.contains("foxtrot"));
}

#[rstest]
fn test_try_insert_stores_keys() {
    let mut tree: SmallTree = OrderedTree::new();
    for key in 0..50 {
        assert!(matches!(tree.try_insert(key), Ok(Insertion::Inserted)));
    }
    assert!(matches!(
        tree.try_insert(25),
        Ok(Insertion::AlreadyPresent { existing: &25, rejected: 25 })
    ));
    assert_eq!(tree.len(), 50);
    assert_eq!(tree.check_invariants(), Ok(()));
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_from_single_node_tree() {
    let mut tree: SmallTree = [1, 2, 3, 4].into();
    assert_eq!(tree.remove(&2), Some(2));
    assert_eq!(tree.entries(), 3);
    assert_eq!(tree.find(&2), None);
    assert_eq!(applied(&tree), vec![1, 3, 4]);
}

#[rstest]
fn test_remove_that_merges_into_root() {
    let mut tree: SmallTree = [1, 2, 3, 4, 5].into();
    assert_eq!(tree.remove(&5), Some(5));
    assert_eq!(tree.height(), 1);
    assert_eq!(keys(&tree), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_remove_every_key_in_insertion_order() {
    let mut tree: SmallTree = (0..64).collect();
    for key in 0..64 {
        assert_eq!(tree.remove(&key), Some(key));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[rstest]
fn test_remove_every_key_in_reverse_order() {
    let mut tree: SmallTree = (0..64).collect();
    for key in (0..64).rev() {
        assert_eq!(tree.remove(&key), Some(key));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());
}

#[rstest]
fn test_reinsert_after_emptying() {
    let mut tree: SmallTree = (0..10).collect();
    for key in 0..10 {
        tree.remove(&key);
    }
    assert!(tree.insert(3).is_inserted());
    assert_eq!(keys(&tree), vec![3]);
    assert_eq!(tree.height(), 1);
}

#[rstest]
fn test_pop_first_and_pop_last() {
    let mut tree: SmallTree = (1..=9).collect();
    assert_eq!(tree.pop_first(), Some(1));
    assert_eq!(tree.pop_last(), Some(9));
    assert_eq!(tree.first(), Some(&2));
    assert_eq!(tree.last(), Some(&8));
    assert_eq!(tree.len(), 7);
}

#[rstest]
fn test_retain_filters_and_rebalances() {
    let mut tree: SmallTree = (0..200).collect();
    tree.retain(|key| key % 5 == 0);
    assert_eq!(tree.len(), 40);
    assert_eq!(keys(&tree), (0..200).step_by(5).collect::<Vec<_>>());
    assert_eq!(tree.check_invariants(), Ok(()));
}

// =============================================================================
// Set Relation Tests
// =============================================================================

#[rstest]
#[case(&[], &[], true)]
#[case(&[], &[1, 2], true)]
#[case(&[1], &[], false)]
#[case(&[2, 4, 6], &[1, 2, 3, 4, 5, 6, 7, 8], true)]
#[case(&[2, 4, 9], &[1, 2, 3, 4, 5, 6, 7, 8], false)]
#[case(&[1, 2, 3, 4, 5, 6, 7, 8], &[2, 4, 6], false)]
fn test_is_subset_of(#[case] left: &[i32], #[case] right: &[i32], #[case] expected: bool) {
    let left: SmallTree = left.iter().copied().collect();
    let right: OrderedTree<i32, 3> = right.iter().copied().collect();
    assert_eq!(left.is_subset_of(&right), expected);
    assert_eq!(right.is_superset_of(&left), expected);
}

#[rstest]
fn test_every_tree_is_subset_of_itself() {
    let tree: SmallTree = (0..30).collect();
    assert!(tree.is_subset_of(&tree));
}

#[rstest]
#[case(&[1, 3, 5], &[2, 4, 6], true)]
#[case(&[1, 3, 5], &[5, 7], false)]
#[case(&[], &[1], true)]
fn test_is_disjoint(#[case] left: &[i32], #[case] right: &[i32], #[case] expected: bool) {
    let left: SmallTree = left.iter().copied().collect();
    let right: SmallTree = right.iter().copied().collect();
    assert_eq!(left.is_disjoint(&right), expected);
    assert_eq!(right.is_disjoint(&left), expected);
}

#[rstest]
fn test_equals_ignores_insertion_order_and_layout() {
    let ascending: SmallTree = (1..=50).collect();
    let descending: OrderedTree<i32, 4> = (1..=50).rev().collect();
    assert!(ascending.equals(&descending));
    assert!(descending.equals(&ascending));
    assert_eq!(ascending, descending);
}

#[rstest]
fn test_equals_detects_differences() {
    let tree: SmallTree = (1..=5).collect();
    let missing: SmallTree = (1..=4).collect();
    let different: SmallTree = [1, 2, 3, 4, 6].into();
    assert!(!tree.equals(&missing));
    assert!(!missing.equals(&tree));
    assert!(!tree.equals(&different));
    assert!(SmallTree::new().equals(&SmallTree::new()));
}

#[rstest]
fn test_equal_trees_hash_alike() {
    let left: SmallTree = [3, 1, 2].into();
    let right: SmallTree = [1, 2, 3].into();
    assert_eq!(hash_of(&left), hash_of(&right));
}

// =============================================================================
// Iteration Tests
// =============================================================================

#[rstest]
fn test_apply_and_iter_agree() {
    let tree: SmallTree = (0..100).map(|value| (value * 31) % 100).collect();
    assert_eq!(applied(&tree), keys(&tree));
}

#[rstest]
fn test_into_iter_yields_owned_keys_in_order() {
    let tree: OrderedTree<String, 2> = ["b", "c", "a"].map(String::from).into();
    let owned: Vec<String> = tree.into_iter().collect();
    assert_eq!(owned, vec!["a", "b", "c"]);
}

#[rstest]
fn test_iter_is_exact_size() {
    let tree: SmallTree = (0..37).collect();
    let mut iterator = tree.iter();
    assert_eq!(iterator.len(), 37);
    iterator.nth(9);
    assert_eq!(iterator.len(), 27);
}

#[rstest]
fn test_matches_btreeset_after_mixed_operations() {
    let mut tree: SmallTree = OrderedTree::new();
    let mut reference = BTreeSet::new();
    for step in 0..2000 {
        let key = (step * 7) % 113;
        if step % 3 == 0 {
            assert_eq!(tree.remove(&key), reference.take(&key));
        } else {
            assert_eq!(tree.insert(key).is_inserted(), reference.insert(key));
        }
    }
    assert_eq!(keys(&tree), reference.into_iter().collect::<Vec<_>>());
    assert_eq!(tree.check_invariants(), Ok(()));
}

// =============================================================================
// Association Tests
// =============================================================================

#[rstest]
fn test_tree_of_associations_acts_as_map() {
    let mut tree: OrderedTree<Association<&str, i32>, 2> = OrderedTree::new();
    for (index, name) in ["one", "two", "three", "four", "five"].iter().enumerate() {
        let value = i32::try_from(index).unwrap_or(i32::MAX) + 1;
        assert!(tree.insert(Association::new(*name, value)).is_inserted());
    }

    assert_eq!(tree.find(&"three").map(|entry| *entry.value()), Some(3));
    assert_eq!(tree.replace(Association::new("two", 22)).map(|entry| *entry.value()), Some(2));
    assert_eq!(tree.find(&"two").map(|entry| *entry.value()), Some(22));
    assert_eq!(tree.remove(&"one").map(Association::into_parts), Some(("one", 1)));
    assert_eq!(tree.len(), 4);
}

// =============================================================================
// Invariant Check Tests
// =============================================================================

#[rstest]
fn test_invariant_violation_messages() {
    assert_eq!(
        InvariantViolation::LengthMismatch {
            cached: 3,
            counted: 2
        }
        .to_string(),
        "cached length 3 does not match 2 stored key(s)"
    );
}

// =============================================================================
// Display Tests
// =============================================================================

#[rstest]
fn test_display_and_debug() {
    let tree: SmallTree = [2, 1].into();
    assert_eq!(tree.to_string(), "{1, 2}");
    assert_eq!(format!("{tree:?}"), "{1, 2}");
}
