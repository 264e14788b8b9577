//! SharedIndex - a tree behind one global lock.
//!
//! [`BPlusTree`] has no internal synchronization: a split cascade rewrites
//! several nodes one after another. [`SharedIndex`] serializes every
//! operation through a single `Mutex` so no caller can observe a cascade
//! half-done.

use std::fmt::Debug;

use parking_lot::Mutex;

use crate::common::Result;
use crate::index::btree::{BPlusTree, StatsSnapshot};

/// A [`BPlusTree`] that can be shared between threads.
///
/// # Thread Safety
/// - `tree`: `Mutex` — inserts and reads all take the same lock
///
/// # Usage
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use bptree::{OrderedIndex, SharedIndex};
///
/// let index = Arc::new(SharedIndex::new(OrderedIndex::new()));
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let index = Arc::clone(&index);
///         thread::spawn(move || {
///             for i in 0..25 {
///                 index.insert(t * 100 + i, format!("v{}", i));
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(index.len(), 100);
/// ```
#[derive(Debug)]
pub struct SharedIndex<K, V> {
    tree: Mutex<BPlusTree<K, V>>,
}

impl<K, V> SharedIndex<K, V> {
    /// Wrap an existing tree.
    pub fn new(tree: BPlusTree<K, V>) -> Self {
        Self {
            tree: Mutex::new(tree),
        }
    }

    /// Run `f` with shared access to the tree while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&BPlusTree<K, V>) -> R) -> R {
        let tree = self.tree.lock();
        f(&tree)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.tree.lock().len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.lock().is_empty()
    }

    /// Snapshot of split statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.tree.lock().stats()
    }

    /// Unwrap the tree.
    pub fn into_inner(self) -> BPlusTree<K, V> {
        self.tree.into_inner()
    }
}

impl<K: Ord + Clone + Debug, V> SharedIndex<K, V> {
    /// Insert an entry. The whole split cascade runs under the lock.
    pub fn insert(&self, key: K, value: V) {
        self.tree.lock().insert(key, value);
    }

    /// Verify the tree's structural invariants under the lock.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` if a check fails
    pub fn check_invariants(&self) -> Result<()> {
        self.tree.lock().check_invariants()
    }
}

impl<K: Debug, V: Debug> SharedIndex<K, V> {
    /// Render the tree as text under the lock.
    pub fn dump(&self) -> String {
        self.tree.lock().dump()
    }
}

impl<K, V> From<BPlusTree<K, V>> for SharedIndex<K, V> {
    fn from(tree: BPlusTree<K, V>) -> Self {
        Self::new(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderedIndex;

    #[test]
    fn test_insert_through_lock() {
        let index = SharedIndex::new(OrderedIndex::new());
        assert!(index.is_empty());

        for i in 1..=16 {
            index.insert(i, format!("v{}", i));
        }

        assert_eq!(index.len(), 16);
        assert!(index.check_invariants().is_ok());
        assert_eq!(index.stats().inserts, 16);
    }

    #[test]
    fn test_read_and_into_inner() {
        let index: SharedIndex<i64, String> = OrderedIndex::new().into();
        index.insert(1, "one".to_string());

        let height = index.read(|tree| tree.height());
        assert_eq!(height, 1);

        let dump = index.dump();
        let tree = index.into_inner();
        assert_eq!(tree.dump(), dump);
    }
}
