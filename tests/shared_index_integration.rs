//! Integration tests for the locked index wrapper.
//!
//! These tests verify that concurrent callers never see a half-finished
//! split cascade.

use bptree::{OrderedIndex, SharedIndex};
use std::sync::Arc;
use std::thread;

/// Test concurrent writers inserting disjoint key ranges.
#[test]
fn test_concurrent_writers() {
    let index = Arc::new(SharedIndex::new(OrderedIndex::new()));

    let mut handles = vec![];

    for t in 0..8i64 {
        let index_clone = Arc::clone(&index);

        handles.push(thread::spawn(move || {
            for j in 0..200 {
                let key = j * 8 + t;
                index_clone.insert(key, format!("v{}", key));
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(index.len(), 1600);
    index.check_invariants().unwrap();

    let keys: Vec<i64> = index.read(|tree| tree.leaf_chain().map(|(k, _)| *k).collect());
    assert_eq!(keys, (0..1600).collect::<Vec<_>>());
}

/// Test readers checking invariants while writers split nodes.
#[test]
fn test_readers_see_consistent_tree() {
    let index = Arc::new(SharedIndex::new(OrderedIndex::new()));

    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for k in (0..2000).rev() {
                index.insert(k, format!("v{}", k));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for _ in 0..50 {
                    index.check_invariants().unwrap();
                    let dump = index.dump();
                    assert!(dump.starts_with("level 0:"));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    let stats = index.stats();
    assert_eq!(stats.inserts, 2000);
    assert!(stats.leaf_splits > 0);
}

/// Test unwrapping the shared index after all threads finish.
#[test]
fn test_into_inner_after_threads() {
    let index = Arc::new(SharedIndex::new(OrderedIndex::new()));

    let handles: Vec<_> = (0..4i64)
        .map(|t| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.insert(t, format!("v{}", t)))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let index = Arc::try_unwrap(index).unwrap();
    let tree = index.into_inner();
    assert_eq!(tree.len(), 4);
    tree.check_invariants().unwrap();
}
