//! Arena storage for tree nodes.

use crate::common::NodeId;
use crate::index::btree::node::Node;

/// Append-only storage for the nodes of one tree.
///
/// Nodes are never freed (the index has no delete), so a [`NodeId`] stays
/// valid for the lifetime of the tree.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a node and return its id.
    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.0)
    }

    /// Borrow a node that is known to exist.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    /// Mutable variant of [`node`](Self::node).
    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    /// Number of allocated nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node<K, V>> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_assigns_sequential_ids() {
        let mut arena: NodeArena<i32, String> = NodeArena::new();

        let a = arena.alloc(Node::new_leaf(None));
        let b = arena.alloc(Node::new_leaf(Some(a)));

        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.node(b).parent(), Some(a));
    }

    #[test]
    fn test_get_unknown_id() {
        let arena: NodeArena<i32, String> = NodeArena::new();
        assert!(arena.get(NodeId::new(0)).is_none());
    }

    #[test]
    fn test_node_mut() {
        let mut arena: NodeArena<i32, String> = NodeArena::new();
        let a = arena.alloc(Node::new_leaf(None));

        arena.node_mut(a).parent = Some(NodeId::new(9));
        assert_eq!(arena.node(a).parent(), Some(NodeId::new(9)));
    }
}
