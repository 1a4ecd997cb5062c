//! Original (reference) implementation of identity deduplication.
//!
//! Small inputs use a linear identity scan; from [`DEFAULT_THRESHOLD`]
//! elements on, an insertion-ordered map keyed by instance identity. Both
//! paths return the same output, so the threshold only trades constant cost
//! against asymptotic cost.

use super::identity_keyed::unique_types_keyed;
use super::identity_scan::unique_types_scan;
use crate::dedup::identity::Identity;

/// Input length at which the keyed strategy takes over.
pub const DEFAULT_THRESHOLD: usize = 8;

/// Deduplicate references by instance identity, keeping first occurrences
/// in order.
///
/// # Example
/// ```
/// use identity_dedup::dedup::unique_types::unique_types;
///
/// let (a, b, c) = (String::from("x"), String::from("x"), String::from("y"));
/// let input = [&a, &b, &a, &c, &b, &a];
/// let unique = unique_types(&input);
///
/// assert_eq!(unique.len(), 3);
/// assert!(std::ptr::eq(unique[0], &a));
/// assert!(std::ptr::eq(unique[1], &b));
/// assert!(std::ptr::eq(unique[2], &c));
/// ```
pub fn unique_types<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    unique_types_with_threshold(items, DEFAULT_THRESHOLD)
}

/// Same as [`unique_types`], switching to the keyed strategy at `threshold`.
pub fn unique_types_with_threshold<R: Identity + Clone>(items: &[R], threshold: usize) -> Vec<R> {
    if items.is_empty() {
        return Vec::new();
    }

    if items.len() >= threshold {
        unique_types_keyed(items)
    } else {
        unique_types_scan(items)
    }
}
