//! B+ tree - insertion and the cascading split logic.
//!
//! The [`BPlusTree`] provides:
//! - Sorted insertion of key/value entries
//! - Leaf splits that copy the separator up (B+ tree convention)
//! - Internal splits that move the median up (B-tree convention)
//! - Root growth when a parentless node splits

use std::fmt::Debug;

use tracing::{debug, trace};

use crate::common::config::{IndexConfig, DEFAULT_ORDER};
use crate::common::{NodeId, Result};
use crate::index::btree::arena::NodeArena;
use crate::index::btree::node::{InternalNode, LeafNode, Node, NodeKind};
use crate::index::btree::stats::{SplitCounters, StatsSnapshot};

/// The integer-keyed, string-valued index.
pub type OrderedIndex = BPlusTree<i64, String>;

/// An in-memory B+ tree.
///
/// # Architecture
/// ```text
///                      ┌──────────────┐
///            root ───▶ │ internal [7] │
///                      └──────┬───────┘
///                 ┌───────────┴───────────┐
///          ┌──────▼──────┐         ┌──────▼──────┐
///          │ internal [3]│         │ internal [9]│
///          └──┬───────┬──┘         └──┬───────┬──┘
///      ┌──────▼┐  ┌───▼───┐    ┌─────▼─┐  ┌──▼────┐
///      │[1, 2] │─▶│[3,4,5]│──▶ │ [7, 8]│─▶│[9, 10]│   leaf chain
///      └───────┘  └───────┘    └───────┘  └───────┘
/// ```
///
/// All nodes live in one arena and refer to each other by [`NodeId`]:
/// children through `InternalNode::children`, siblings through
/// `LeafNode::next`, and parents through `Node::parent`. A split rewrites
/// those ids in place.
///
/// # Order
/// A node splits as soon as it holds `order` keys, so between inserts every
/// node holds at most `order - 1` keys.
///
/// # Duplicate Keys
/// Duplicates are accepted, not merged. A new entry goes at the first
/// position whose key is not less than it, which places it before any
/// existing entries with the same key.
///
/// # Thread Safety
/// All mutation takes `&mut self`. Share a tree between threads through
/// [`SharedIndex`](super::SharedIndex).
///
/// # Usage
/// ```
/// use bptree::OrderedIndex;
///
/// let mut tree = OrderedIndex::new();
/// for i in 1..=16 {
///     tree.insert(i, format!("v{}", i));
/// }
///
/// assert_eq!(tree.len(), 16);
/// assert!(!tree.node(tree.root()).unwrap().is_leaf());
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree<K, V> {
    /// Storage for every node ever created.
    pub(crate) arena: NodeArena<K, V>,

    /// Current root. Replaced only when a parentless node splits.
    pub(crate) root: NodeId,

    /// Key count at which a node splits.
    order: usize,

    /// Number of stored entries.
    len: usize,

    /// Split statistics.
    counters: SplitCounters,
}

impl<K, V> BPlusTree<K, V> {
    /// Create an empty tree of the default order.
    ///
    /// The tree starts as a single empty leaf that is both root and head.
    pub fn new() -> Self {
        Self::build(DEFAULT_ORDER)
    }

    /// Create an empty tree with the given order.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn with_order(order: usize) -> Result<Self> {
        Self::with_config(IndexConfig::new(order))
    }

    /// Create an empty tree from a config.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if the configured order is too small
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.order))
    }

    fn build(order: usize) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new_leaf(None));

        Self {
            arena,
            root,
            order,
            len: 0,
            counters: SplitCounters::default(),
        }
    }

    // ========================================================================
    // Public API: Shape
    // ========================================================================

    /// The order `M` this tree was built with.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of stored entries, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entry has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The leftmost leaf, head of the leaf chain.
    ///
    /// Derived by following the first child down from the root on every call.
    pub fn head(&self) -> NodeId {
        let mut current = self.root;
        while let NodeKind::Internal(internal) = &self.arena.node(current).kind {
            current = internal.children[0];
        }
        current
    }

    /// Number of levels, 1 for a tree that is a single leaf.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let NodeKind::Internal(internal) = &self.arena.node(current).kind {
            current = internal.children[0];
            height += 1;
        }
        height
    }

    /// Look up a node by id.
    ///
    /// Returns `None` for an id this tree never allocated.
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.arena.get(id)
    }

    /// Total number of nodes, leaves and internal nodes together.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Snapshot of split counters and tree shape.
    pub fn stats(&self) -> StatsSnapshot {
        let leaf_count = self.arena.iter().filter(|node| node.is_leaf()).count();
        StatsSnapshot::new(self.counters, self.height(), self.arena.len(), leaf_count)
    }

    /// Reset the split counters. The tree itself is untouched.
    pub fn reset_stats(&mut self) {
        self.counters.reset();
    }
}

impl<K: Ord + Clone + Debug, V> BPlusTree<K, V> {
    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert an entry.
    ///
    /// Always succeeds. An existing equal key is not replaced: the new entry
    /// is stored in front of it.
    pub fn insert(&mut self, key: K, value: V) {
        self.counters.inserts += 1;

        let leaf_id = self.find_leaf(&key);
        let order = self.order;

        let overflow = {
            let leaf = self.leaf_mut(leaf_id);
            let pos = leaf.insert_entry(key, value);
            trace!(leaf = %leaf_id, pos, "inserted entry");
            leaf.keys.len() >= order
        };
        self.len += 1;

        if overflow {
            let (separator, right) = self.split_leaf(leaf_id);
            self.propagate_split(leaf_id, separator, right);
        }
    }

    // ========================================================================
    // Internal: Descent
    // ========================================================================

    /// Walk from the root to the leaf that should hold `key`.
    fn find_leaf(&self, key: &K) -> NodeId {
        let mut current = self.root;
        while let NodeKind::Internal(internal) = &self.arena.node(current).kind {
            current = internal.children[internal.child_index(key)];
        }
        current
    }

    // ========================================================================
    // Internal: Splits
    // ========================================================================

    /// Split an overflowing leaf in two.
    ///
    /// The new right leaf takes the upper half of the entries and is linked
    /// into the chain after the original. Returns the separator (a copy of
    /// the right leaf's first key, which stays in the leaf) and the new leaf.
    fn split_leaf(&mut self, leaf_id: NodeId) -> (K, NodeId) {
        let mid = self.order / 2;
        let parent = self.arena.node(leaf_id).parent;

        let (keys, values, next) = {
            let leaf = self.leaf_mut(leaf_id);
            let keys = leaf.keys.split_off(mid);
            let values = leaf.values.split_off(mid);
            (keys, values, leaf.next)
        };
        let separator = keys[0].clone();

        let right = self.arena.alloc(Node {
            parent,
            kind: NodeKind::Leaf(LeafNode { keys, values, next }),
        });
        self.leaf_mut(leaf_id).next = Some(right);
        self.counters.leaf_splits += 1;

        debug!(left = %leaf_id, right = %right, separator = ?separator, "split leaf");
        (separator, right)
    }

    /// Split an overflowing internal node in two.
    ///
    /// The median key moves up and is kept by neither half. Children handed
    /// to the new right node are re-parented to it. Returns the median and
    /// the new node.
    fn split_internal(&mut self, node_id: NodeId) -> (K, NodeId) {
        let mid = self.order / 2;
        let parent = self.arena.node(node_id).parent;

        let (median, keys, children) = {
            let internal = self.internal_mut(node_id);
            let mut keys = internal.keys.split_off(mid);
            let median = keys.remove(0);
            let children = internal.children.split_off(mid + 1);
            (median, keys, children)
        };

        let right = self.arena.alloc(Node {
            parent,
            kind: NodeKind::Internal(InternalNode {
                keys,
                children: Vec::new(),
            }),
        });
        for &child in &children {
            self.arena.node_mut(child).parent = Some(right);
        }
        self.internal_mut(right).children = children;
        self.counters.internal_splits += 1;

        debug!(left = %node_id, right = %right, median = ?median, "split internal node");
        (median, right)
    }

    /// Push a split result up the tree until some node absorbs it.
    ///
    /// Each round inserts `separator`/`right` into the parent of `left`. If
    /// the parent overflows it splits and the round repeats one level higher.
    /// A parentless `left` ends the cascade with a new root.
    fn propagate_split(&mut self, mut left: NodeId, mut separator: K, mut right: NodeId) {
        let order = self.order;

        loop {
            let Some(parent) = self.arena.node(left).parent else {
                self.grow_root(left, separator, right);
                return;
            };

            let overflow = {
                let internal = self.internal_mut(parent);
                internal.insert_separator(left, separator, right);
                internal.keys.len() >= order
            };
            if !overflow {
                return;
            }

            let (median, sibling) = self.split_internal(parent);
            left = parent;
            separator = median;
            right = sibling;
        }
    }

    /// Replace the root with a new internal node over `left` and `right`.
    fn grow_root(&mut self, left: NodeId, separator: K, right: NodeId) {
        let root = self.arena.alloc(Node {
            parent: None,
            kind: NodeKind::Internal(InternalNode {
                keys: vec![separator],
                children: vec![left, right],
            }),
        });
        self.arena.node_mut(left).parent = Some(root);
        self.arena.node_mut(right).parent = Some(root);
        self.root = root;
        self.counters.root_splits += 1;

        debug!(root = %root, height = self.height(), "grew new root");
    }

    // ========================================================================
    // Internal: Typed access
    // ========================================================================

    fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match &mut self.arena.node_mut(id).kind {
            NodeKind::Leaf(leaf) => leaf,
            NodeKind::Internal(_) => unreachable!("{} is not a leaf", id),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match &mut self.arena.node_mut(id).kind {
            NodeKind::Internal(internal) => internal,
            NodeKind::Leaf(_) => unreachable!("{} is not an internal node", id),
        }
    }
}

impl<K, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
