//! bptree - an in-memory B+ tree ordered index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             bptree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Shared access (index::btree::SharedIndex)       │   │
//! │  │              one Mutex around every operation            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 BPlusTree (index::btree)                 │   │
//! │  │   insert → descend → leaf insert → split → cascade up    │   │
//! │  │   dump / leaf_chain / check_invariants  (read-only)      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                NodeArena: Vec<Node>, NodeId              │   │
//! │  │    Leaf { keys, values, next } | Internal { keys, kids } │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The B+ tree
//! - [`logging`] - Tracing subscriber setup for binaries
//!
//! # Quick Start
//! ```
//! use bptree::OrderedIndex;
//!
//! let mut tree = OrderedIndex::new();
//! for i in 1..=16 {
//!     tree.insert(i, format!("v{}", i));
//! }
//!
//! let keys: Vec<i64> = tree.leaf_chain().map(|(k, _)| *k).collect();
//! assert_eq!(keys, (1..=16).collect::<Vec<_>>());
//! print!("{}", tree.dump());
//! ```

pub mod common;
pub mod index;
pub mod logging;

// Re-export commonly used items at crate root for convenience
pub use common::config::{IndexConfig, DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, NodeId, Result};

pub use index::btree::{BPlusTree, LeafChain, Node, OrderedIndex, SharedIndex, StatsSnapshot};
