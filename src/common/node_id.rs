//! Node identifier type.

use std::fmt;

/// Identifies a node in the tree's arena.
///
/// Using `usize` because:
/// 1. Nodes are stored in `Vec<Node>`
/// 2. Direct indexing without casting: `nodes[node_id.0]`
/// 3. Parent and sibling links stay plain copies, never owning references
///
/// # Example
/// ```
/// use bptree::NodeId;
///
/// let node_id = NodeId::new(5);
/// assert_eq!(node_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_new() {
        let nid = NodeId::new(10);
        assert_eq!(nid.0, 10);
    }

    #[test]
    fn test_node_id_equality() {
        assert_eq!(NodeId::new(5), NodeId::new(5));
        assert_ne!(NodeId::new(5), NodeId::new(6));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(42)), "Node(42)");
    }
}
