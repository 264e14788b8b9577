//! Configuration for the B+ tree index.

use crate::common::{Error, Result};

/// Default order (`M`) of the tree.
///
/// A node splits once it holds `M` keys, so in steady state every node
/// holds at most `M - 1 = 3` keys and every internal node at most 4 children.
pub const DEFAULT_ORDER: usize = 4;

/// Smallest order the split algorithm supports.
///
/// With `M = 2` an internal split would promote the last key and leave the
/// right half with one child and no keys.
pub const MIN_ORDER: usize = 3;

/// Construction-time settings for a [`BPlusTree`](crate::index::btree::BPlusTree).
///
/// # Example
/// ```
/// use bptree::common::config::IndexConfig;
///
/// let config = IndexConfig::default().with_order(8);
/// assert_eq!(config.order, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Order `M`: the key count at which a node splits.
    pub order: usize,
}

impl IndexConfig {
    /// Create a config with the given order.
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Replace the order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Check that the settings can build a tree.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        assert_eq!(IndexConfig::default().order, DEFAULT_ORDER);
        assert_eq!(DEFAULT_ORDER, 4);
    }

    #[test]
    fn test_validate_rejects_small_order() {
        let err = IndexConfig::new(2).validate().unwrap_err();
        match err {
            Error::InvalidOrder { order, min } => {
                assert_eq!(order, 2);
                assert_eq!(min, MIN_ORDER);
            }
            other => panic!("Expected InvalidOrder, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_min_order() {
        assert!(IndexConfig::new(MIN_ORDER).validate().is_ok());
        assert!(IndexConfig::default().with_order(64).validate().is_ok());
    }
}
