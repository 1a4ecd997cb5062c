//! Identity-keyed deduplication through an insertion-ordered map.

use crate::dedup::identity::Identity;
use fxhash::FxBuildHasher;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Map identity keys to references; values come back out in the order their
/// keys were first inserted.
///
/// O(n) amortized. A repeated key never moves or replaces the first entry.
pub fn unique_types_keyed<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    let mut by_key: IndexMap<usize, R, FxBuildHasher> =
        IndexMap::with_capacity_and_hasher(items.len(), FxBuildHasher::default());

    for item in items {
        if let Entry::Vacant(slot) = by_key.entry(item.identity_key()) {
            slot.insert(item.clone());
        }
    }

    by_key.into_values().collect()
}
