//! B+ tree index implementation.
//!
//! # Components
//! - [`BPlusTree`] - The tree: insertion and cascading splits
//! - [`Node`] - A leaf or internal node, addressed by [`NodeId`](crate::NodeId)
//! - [`SharedIndex`] - The tree behind a single lock
//! - [`LeafChain`] - Diagnostic walk along the leaf siblings
//! - [`StatsSnapshot`] - Split statistics

mod arena;
mod diagnostics;
mod dump;
mod node;
mod shared;
mod stats;
mod tree;

pub use diagnostics::LeafChain;
pub use node::Node;
pub use shared::SharedIndex;
pub use stats::StatsSnapshot;
pub use tree::{BPlusTree, OrderedIndex};
