//! Reusable deduplicator.
//!
//! Hot loops that deduplicate thousands of times per second pay for a fresh
//! hash table on every call. [`Deduplicator`] keeps its seen-set between
//! calls and only clears it, so steady-state calls allocate nothing but the
//! output vector.

use super::original::DEFAULT_THRESHOLD;
use crate::dedup::identity::Identity;
use fxhash::FxHashSet;
use std::cell::RefCell;

/// Scratch sets larger than this are dropped instead of kept around.
const MAX_RETAINED_CAPACITY: usize = 1 << 16;

/// Deduplicator with retained scratch storage.
#[derive(Debug)]
pub struct Deduplicator {
    seen: FxHashSet<usize>,
    threshold: usize,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// Use the keyed strategy for inputs of at least `threshold` elements.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            seen: FxHashSet::default(),
            threshold,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Deduplicate `items` by instance identity, keeping first occurrences.
    pub fn dedupe<R: Identity + Clone>(&mut self, items: &[R]) -> Vec<R> {
        if items.len() < self.threshold {
            return super::identity_scan::unique_types_scan(items);
        }

        self.seen.clear();
        self.seen.reserve(items.len());

        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if self.seen.insert(item.identity_key()) {
                unique.push(item.clone());
            }
        }

        if self.seen.capacity() > MAX_RETAINED_CAPACITY {
            self.seen = FxHashSet::default();
        }

        unique
    }
}

thread_local! {
    static DEDUPLICATOR: RefCell<Deduplicator> = RefCell::new(Deduplicator::new());
}

/// Threshold dispatch backed by a thread-local [`Deduplicator`].
pub fn unique_types_pooled<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    DEDUPLICATOR.with(|dedup| match dedup.try_borrow_mut() {
        Ok(mut dedup) => dedup.dedupe(items),
        // Re-entered from inside a clone; use a throwaway instance.
        Err(_) => Deduplicator::new().dedupe(items),
    })
}
