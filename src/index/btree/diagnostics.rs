//! Read-only diagnostics: leaf chain walk and invariant verification.
//!
//! These never mutate the tree. They exist to inspect the structure in
//! tests and from the demo driver, not as a query interface.

use std::fmt::Debug;

use crate::common::{Error, NodeId, Result};
use crate::index::btree::dump::Preorder;
use crate::index::btree::node::NodeKind;
use crate::index::btree::BPlusTree;

/// Iterator over all entries by following the leaf sibling chain.
///
/// Starts at [`BPlusTree::head`] and yields `(&key, &value)` in chain order.
pub struct LeafChain<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    leaf: Option<NodeId>,
    pos: usize,
}

impl<'a, K, V> Iterator for LeafChain<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.leaf?;
            let NodeKind::Leaf(leaf) = &self.tree.arena.node(id).kind else {
                self.leaf = None;
                return None;
            };
            if self.pos < leaf.keys.len() {
                let item = (&leaf.keys[self.pos], &leaf.values[self.pos]);
                self.pos += 1;
                return Some(item);
            }
            self.leaf = leaf.next;
            self.pos = 0;
        }
    }
}

impl<K, V> BPlusTree<K, V> {
    /// Walk the leaf chain from the head.
    ///
    /// # Example
    /// ```
    /// use bptree::OrderedIndex;
    ///
    /// let mut tree = OrderedIndex::new();
    /// for i in [3, 1, 2] {
    ///     tree.insert(i, format!("v{}", i));
    /// }
    ///
    /// let keys: Vec<i64> = tree.leaf_chain().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    pub fn leaf_chain(&self) -> LeafChain<'_, K, V> {
        LeafChain {
            tree: self,
            leaf: Some(self.head()),
            pos: 0,
        }
    }
}

impl<K: Ord + Debug, V> BPlusTree<K, V> {
    /// Verify every structural invariant of the tree.
    ///
    /// Checks, for every node reachable from the root:
    /// - internal nodes have one more child than keys
    /// - no node holds `order` or more keys
    /// - non-root nodes hold at least one key
    /// - keys within a node are non-decreasing
    /// - keys under `children[i]` lie within the separators around it
    /// - each child's parent link points back at the node listing it, once
    /// - all leaves sit at the same depth
    ///
    /// Then checks that the leaf chain visits exactly the leaves in
    /// left-to-right order, ends there, and holds `len()` entries.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first failed check
    pub fn check_invariants(&self) -> Result<()> {
        if self.arena.node(self.root).parent.is_some() {
            return Err(violation(format!("root {} has a parent", self.root)));
        }

        let mut leaves = Vec::new();
        let mut leaf_depth = None;

        for (depth, id, node) in Preorder::new(self) {
            let keys = node.keys();

            if keys.len() >= self.order() {
                return Err(violation(format!(
                    "{} holds {} keys, order is {}",
                    id,
                    keys.len(),
                    self.order()
                )));
            }
            if id != self.root && keys.is_empty() {
                return Err(violation(format!("non-root {} is empty", id)));
            }
            if keys.windows(2).any(|w| w[0] > w[1]) {
                return Err(violation(format!("{} keys out of order: {:?}", id, keys)));
            }

            match &node.kind {
                NodeKind::Leaf(leaf) => {
                    if leaf.values.len() != leaf.keys.len() {
                        return Err(violation(format!(
                            "leaf {} has {} keys but {} values",
                            id,
                            leaf.keys.len(),
                            leaf.values.len()
                        )));
                    }
                    match leaf_depth {
                        None => leaf_depth = Some(depth),
                        Some(d) if d != depth => {
                            return Err(violation(format!(
                                "leaf {} at depth {}, expected {}",
                                id, depth, d
                            )));
                        }
                        Some(_) => {}
                    }
                    leaves.push(id);
                }
                NodeKind::Internal(internal) => {
                    if internal.children.len() != internal.keys.len() + 1 {
                        return Err(violation(format!(
                            "{} has {} keys but {} children",
                            id,
                            internal.keys.len(),
                            internal.children.len()
                        )));
                    }
                    for (i, &child) in internal.children.iter().enumerate() {
                        self.check_child(id, &internal.keys, &internal.children, i, child)?;
                    }
                }
            }
        }

        self.check_leaf_chain(&leaves)
    }

    /// Check parent link and key range of `children[i]` under `parent`.
    fn check_child(
        &self,
        parent: NodeId,
        keys: &[K],
        children: &[NodeId],
        i: usize,
        child: NodeId,
    ) -> Result<()> {
        let node = self
            .arena
            .get(child)
            .ok_or_else(|| violation(format!("{} lists unknown child {}", parent, child)))?;

        if node.parent != Some(parent) {
            return Err(violation(format!(
                "{} has parent {:?}, listed under {}",
                child, node.parent, parent
            )));
        }
        if children.iter().filter(|&&c| c == child).count() != 1 {
            return Err(violation(format!("{} listed twice under {}", child, parent)));
        }

        let (Some(min), Some(max)) = (self.subtree_min(child), self.subtree_max(child)) else {
            return Ok(());
        };
        if let Some(upper) = keys.get(i) {
            if max > upper {
                return Err(violation(format!(
                    "{} holds {:?}, above separator {:?} of {}",
                    child, max, upper, parent
                )));
            }
        }
        if let Some(lower) = i.checked_sub(1).and_then(|j| keys.get(j)) {
            if min < lower {
                return Err(violation(format!(
                    "{} holds {:?}, below separator {:?} of {}",
                    child, min, lower, parent
                )));
            }
        }
        Ok(())
    }

    fn check_leaf_chain(&self, leaves: &[NodeId]) -> Result<()> {
        let mut current = Some(self.head());
        for &expected in leaves {
            match current {
                Some(id) if id == expected => current = self.arena.node(id).next(),
                other => {
                    return Err(violation(format!(
                        "leaf chain reached {:?}, tree order expects {}",
                        other, expected
                    )));
                }
            }
        }
        if let Some(extra) = current {
            return Err(violation(format!("leaf chain continues past last leaf to {}", extra)));
        }

        let entries = self.leaf_chain().count();
        if entries != self.len() {
            return Err(violation(format!(
                "leaf chain holds {} entries, len is {}",
                entries,
                self.len()
            )));
        }
        Ok(())
    }

    /// Smallest key stored in the leaves under `id`.
    fn subtree_min(&self, mut id: NodeId) -> Option<&K> {
        loop {
            match &self.arena.node(id).kind {
                NodeKind::Leaf(leaf) => return leaf.keys.first(),
                NodeKind::Internal(internal) => id = *internal.children.first()?,
            }
        }
    }

    /// Largest key stored in the leaves under `id`.
    fn subtree_max(&self, mut id: NodeId) -> Option<&K> {
        loop {
            match &self.arena.node(id).kind {
                NodeKind::Leaf(leaf) => return leaf.keys.last(),
                NodeKind::Internal(internal) => id = *internal.children.last()?,
            }
        }
    }
}

fn violation(msg: String) -> Error {
    Error::InvariantViolation(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedIndex;

    fn build(keys: impl IntoIterator<Item = i64>) -> OrderedIndex {
        let mut tree = OrderedIndex::new();
        for k in keys {
            tree.insert(k, format!("v{}", k));
        }
        tree
    }

    #[test]
    fn test_leaf_chain_empty() {
        let tree = OrderedIndex::new();
        assert_eq!(tree.leaf_chain().count(), 0);
    }

    #[test]
    fn test_leaf_chain_crosses_leaves() {
        let tree = build([5, 1, 9, 3, 7, 2, 8, 4, 6]);

        let entries: Vec<(i64, String)> =
            tree.leaf_chain().map(|(k, v)| (*k, v.clone())).collect();
        let expected: Vec<(i64, String)> = (1..=9).map(|k| (k, format!("v{}", k))).collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn test_check_invariants_on_valid_trees() {
        assert!(OrderedIndex::new().check_invariants().is_ok());
        assert!(build(1..=100).check_invariants().is_ok());
        assert!(build((1..=100).rev()).check_invariants().is_ok());
        assert!(build([4, 4, 4, 4, 4, 4, 4, 4]).check_invariants().is_ok());
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = build(1..=4);
        let leaf = tree.head();
        tree.arena.node_mut(leaf).parent = None;

        match tree.check_invariants() {
            Err(Error::InvariantViolation(msg)) => assert!(msg.contains("parent")),
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_detects_broken_chain() {
        let mut tree = build(1..=4);
        let head = tree.head();
        if let NodeKind::Leaf(leaf) = &mut tree.arena.node_mut(head).kind {
            leaf.next = None;
        }

        assert!(matches!(
            tree.check_invariants(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_detects_misrouted_key() {
        let mut tree = build(1..=4);
        let head = tree.head();
        if let NodeKind::Leaf(leaf) = &mut tree.arena.node_mut(head).kind {
            leaf.keys[1] = 50;
        }

        match tree.check_invariants() {
            Err(Error::InvariantViolation(msg)) => assert!(msg.contains("separator")),
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }
}
