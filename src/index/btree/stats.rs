//! Split statistics tracking.

use std::fmt;

/// Counters maintained by [`BPlusTree::insert`](super::BPlusTree::insert).
///
/// The tree is mutated through `&mut self` only, so plain integers suffice.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SplitCounters {
    /// Number of insert calls.
    pub(crate) inserts: u64,

    /// Number of leaf splits.
    pub(crate) leaf_splits: u64,

    /// Number of internal node splits.
    pub(crate) internal_splits: u64,

    /// Number of times a new root was created.
    pub(crate) root_splits: u64,
}

impl SplitCounters {
    /// Reset all counters to zero.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A point-in-time snapshot of index statistics.
///
/// Combines the split counters with the current shape of the tree.
///
/// # Example
/// ```
/// use bptree::OrderedIndex;
///
/// let mut tree = OrderedIndex::new();
/// for i in 1..=4 {
///     tree.insert(i, format!("v{}", i));
/// }
///
/// let stats = tree.stats();
/// assert_eq!(stats.inserts, 4);
/// assert_eq!(stats.leaf_splits, 1);
/// assert_eq!(stats.height, 2);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub leaf_splits: u64,
    pub internal_splits: u64,
    pub root_splits: u64,
    pub height: usize,
    pub node_count: usize,
    pub leaf_count: usize,
}

impl StatsSnapshot {
    pub(crate) fn new(
        counters: SplitCounters,
        height: usize,
        node_count: usize,
        leaf_count: usize,
    ) -> Self {
        Self {
            inserts: counters.inserts,
            leaf_splits: counters.leaf_splits,
            internal_splits: counters.internal_splits,
            root_splits: counters.root_splits,
            height,
            node_count,
            leaf_count,
        }
    }

    /// Average number of splits per insert (0.0 when nothing was inserted).
    pub fn splits_per_insert(&self) -> f64 {
        if self.inserts == 0 {
            0.0
        } else {
            (self.leaf_splits + self.internal_splits) as f64 / self.inserts as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, leaf_splits: {}, internal_splits: {}, root_splits: {}, height: {}, nodes: {}, leaves: {}, splits/insert: {:.2} }}",
            self.inserts,
            self.leaf_splits,
            self.internal_splits,
            self.root_splits,
            self.height,
            self.node_count,
            self.leaf_count,
            self.splits_per_insert()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_reset() {
        let mut counters = SplitCounters {
            inserts: 10,
            leaf_splits: 3,
            internal_splits: 1,
            root_splits: 2,
        };

        counters.reset();

        assert_eq!(counters, SplitCounters::default());
    }

    #[test]
    fn test_splits_per_insert() {
        let counters = SplitCounters {
            inserts: 8,
            leaf_splits: 3,
            internal_splits: 1,
            root_splits: 1,
        };
        let snapshot = StatsSnapshot::new(counters, 2, 5, 4);
        assert_eq!(snapshot.splits_per_insert(), 0.5);

        let empty = StatsSnapshot::new(SplitCounters::default(), 1, 1, 1);
        assert_eq!(empty.splits_per_insert(), 0.0);
    }

    #[test]
    fn test_stats_display() {
        let counters = SplitCounters {
            inserts: 16,
            leaf_splits: 7,
            internal_splits: 1,
            root_splits: 2,
        };
        let display = format!("{}", StatsSnapshot::new(counters, 3, 12, 8));

        assert!(display.contains("inserts: 16"));
        assert!(display.contains("leaf_splits: 7"));
        assert!(display.contains("height: 3"));
        assert!(display.contains("splits/insert: 0.50"));
    }
}
