//! Node - a leaf or internal node of the B+ tree.
//!
//! A [`Node`] pairs a [`NodeKind`] payload with the parent link used to walk
//! upward during split propagation:
//! - [`LeafNode`] holds the key/value entries and the sibling link
//! - [`InternalNode`] holds separator keys and child links

use crate::common::NodeId;

/// A node in the tree's arena.
///
/// The parent link is an arena index. Parents own their children through the
/// arena; the link back up carries no ownership.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// Parent node, or `None` for the root.
    pub(crate) parent: Option<NodeId>,

    /// Leaf or internal payload.
    pub(crate) kind: NodeKind<K, V>,
}

/// Payload of a node.
///
/// Using an enum instead of one struct with optional fields means a leaf can
/// never carry children and an internal node can never carry values.
#[derive(Debug, Clone)]
pub enum NodeKind<K, V> {
    Leaf(LeafNode<K, V>),
    Internal(InternalNode<K>),
}

/// Bottom-level node holding the actual entries.
///
/// # Invariants
/// - `keys.len() == values.len()`, index-aligned
/// - `keys` is non-decreasing
/// - `next` points at the leaf holding the following key range
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) next: Option<NodeId>,
}

/// Routing node holding separator keys.
///
/// # Invariants
/// - `children.len() == keys.len() + 1`
/// - every key under `children[i]` is `<= keys[i]` and `>= keys[i - 1]`
#[derive(Debug, Clone)]
pub struct InternalNode<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<NodeId>,
}

impl<K, V> LeafNode<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            next: None,
        }
    }
}

impl<K: Ord, V> LeafNode<K, V> {
    /// Insert an entry at the first position whose key is not less than `key`.
    ///
    /// Returns the position used. An equal key goes before the existing ones.
    pub(crate) fn insert_entry(&mut self, key: K, value: V) -> usize {
        let pos = lower_bound(&self.keys, &key);
        self.keys.insert(pos, key);
        self.values.insert(pos, value);
        pos
    }
}

impl<K: Ord> InternalNode<K> {
    /// Index of the child a search for `key` descends into.
    #[inline]
    pub(crate) fn child_index(&self, key: &K) -> usize {
        lower_bound(&self.keys, key)
    }

    /// Insert a separator and the new right sibling split off `left`.
    ///
    /// The key goes at `pos`, the slot of `left`, and `right` at `pos + 1`,
    /// directly after `left`. With distinct keys `pos` is the lower bound of
    /// `key`. When the left neighbour's separator equals `key` the lower
    /// bound would land one slot early, so the slot of `left` is used.
    pub(crate) fn insert_separator(&mut self, left: NodeId, key: K, right: NodeId) {
        let pos = self
            .children
            .iter()
            .position(|&child| child == left)
            .unwrap_or_else(|| lower_bound(&self.keys, &key));
        self.keys.insert(pos, key);
        self.children.insert(pos + 1, right);
    }
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_leaf(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            kind: NodeKind::Leaf(LeafNode::new()),
        }
    }

    /// Whether this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Parent of this node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Keys stored in this node (entries for a leaf, separators otherwise).
    pub fn keys(&self) -> &[K] {
        match &self.kind {
            NodeKind::Leaf(leaf) => &leaf.keys,
            NodeKind::Internal(internal) => &internal.keys,
        }
    }

    /// Values of a leaf, `None` for an internal node.
    pub fn values(&self) -> Option<&[V]> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(&leaf.values),
            NodeKind::Internal(_) => None,
        }
    }

    /// Children of an internal node, `None` for a leaf.
    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal(internal) => Some(&internal.children),
        }
    }

    /// Next leaf in the sibling chain, `None` for the last leaf and for
    /// internal nodes.
    pub fn next(&self) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Leaf(leaf) => leaf.next,
            NodeKind::Internal(_) => None,
        }
    }

    /// Number of keys in this node.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.keys().len()
    }
}

/// Smallest index `i` with `keys[i] >= key`, or `keys.len()` if none.
#[inline]
pub(crate) fn lower_bound<K: Ord>(keys: &[K], key: &K) -> usize {
    keys.partition_point(|k| k < key)
}
