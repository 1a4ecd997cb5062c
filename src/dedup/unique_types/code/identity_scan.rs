//! Linear identity scan.
//!
//! O(n²) in the worst case, but no key is computed or stored, which makes it
//! the cheapest strategy for a handful of elements.

use crate::dedup::identity::Identity;

/// Keep each element unless an identical instance was already kept.
pub fn unique_types_scan<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    let mut unique: Vec<R> = Vec::with_capacity(items.len());

    for item in items {
        if !unique.iter().any(|kept| kept.same_instance(item)) {
            unique.push(item.clone());
        }
    }

    unique
}
