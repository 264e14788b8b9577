//! Human-readable dump of the tree structure.
//!
//! Output is one line per node in pre-order (a node, then its children left
//! to right), indented two spaces per level:
//! ```text
//! level 0: internal keys=[3]
//!   level 1: leaf keys=[1, 2] values=["v1", "v2"]
//!   level 1: leaf keys=[3, 4] values=["v3", "v4"]
//! ```
//! The exact text is meant for people, not parsers.

use std::fmt::{self, Debug};
use std::io;

use crate::common::{NodeId, Result};
use crate::index::btree::node::{Node, NodeKind};
use crate::index::btree::BPlusTree;

/// Pre-order walk over `(depth, id, node)`.
pub(crate) struct Preorder<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    stack: Vec<(usize, NodeId)>,
}

impl<'a, K, V> Preorder<'a, K, V> {
    pub(crate) fn new(tree: &'a BPlusTree<K, V>) -> Self {
        Self {
            tree,
            stack: vec![(0, tree.root)],
        }
    }
}

impl<'a, K, V> Iterator for Preorder<'a, K, V> {
    type Item = (usize, NodeId, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.tree.arena.node(id);
        if let NodeKind::Internal(internal) = &node.kind {
            // Reversed so the leftmost child is popped first.
            self.stack
                .extend(internal.children.iter().rev().map(|&c| (depth + 1, c)));
        }
        Some((depth, id, node))
    }
}

impl<K: Debug, V: Debug> BPlusTree<K, V> {
    /// Render the tree as text.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Write the dump to `out`.
    ///
    /// # Errors
    /// - `Error::Io` if the writer fails
    pub fn write_dump<W: io::Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", self)?;
        out.flush()?;
        Ok(())
    }

    /// Print the dump to stdout.
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl<K: Debug, V: Debug> fmt::Display for BPlusTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, _, node) in Preorder::new(self) {
            write!(f, "{:indent$}level {}: ", "", depth, indent = depth * 2)?;
            match &node.kind {
                NodeKind::Leaf(leaf) => {
                    writeln!(f, "leaf keys={:?} values={:?}", leaf.keys, leaf.values)?
                }
                NodeKind::Internal(internal) => writeln!(f, "internal keys={:?}", internal.keys)?,
            }
        }
        Ok(())
    }
}
