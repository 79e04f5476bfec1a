//! Serde support for [`OrderedTree`].
//!
//! A tree is written as a plain sequence of its keys in ascending order.
//! Node layout never appears in the serialized form: deserializing inserts
//! the keys one by one, so balance is rebuilt from scratch and duplicate
//! keys in the input collapse into one.

use std::fmt;
use std::marker::PhantomData;

use super::OrderedTree;

impl<K, const ORDER: usize> serde::Serialize for OrderedTree<K, ORDER>
where
    K: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for key in self {
            sequence.serialize_element(key)?;
        }
        sequence.end()
    }
}

struct OrderedTreeVisitor<K, const ORDER: usize> {
    marker: PhantomData<K>,
}

impl<K, const ORDER: usize> OrderedTreeVisitor<K, ORDER> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, K, const ORDER: usize> serde::de::Visitor<'de> for OrderedTreeVisitor<K, ORDER>
where
    K: serde::Deserialize<'de> + Ord,
{
    type Value = OrderedTree<K, ORDER>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut tree = OrderedTree::new();
        while let Some(key) = access.next_element()? {
            let _ = tree.insert(key);
        }
        Ok(tree)
    }
}

impl<'de, K, const ORDER: usize> serde::Deserialize<'de> for OrderedTree<K, ORDER>
where
    K: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedTreeVisitor::new())
    }
}
