//! Seen-set deduplication.
//!
//! Tracks identity keys in a hash set and appends to the output directly, so
//! the map never holds the references. Empty and single-element inputs skip
//! the set entirely.

use crate::dedup::identity::Identity;
use fxhash::FxHashSet;

pub fn unique_types_seen_set<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    match items {
        [] => return Vec::new(),
        [only] => return vec![only.clone()],
        _ => {}
    }

    let mut seen: FxHashSet<usize> =
        FxHashSet::with_capacity_and_hasher(items.len(), Default::default());
    let mut unique = Vec::with_capacity(items.len());

    for item in items {
        if seen.insert(item.identity_key()) {
            unique.push(item.clone());
        }
    }

    unique
}
