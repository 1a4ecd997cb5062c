//! Identity deduplication implementations.
//!
//! This module contains all implementation variants of `unique_types`.

pub mod c_impl;
mod identity_keyed;
mod identity_scan;
mod original;
mod pooled;
mod seen_set;

pub use c_impl::{unique_types_c, C_IMPL_AVAILABLE};
pub use identity_keyed::unique_types_keyed;
pub use identity_scan::unique_types_scan;
pub use original::{unique_types, unique_types_with_threshold, DEFAULT_THRESHOLD};
pub use pooled::{unique_types_pooled, Deduplicator};
pub use seen_set::unique_types_seen_set;

use crate::dedup::identity::Identity;
use crate::utils::VariantInfo;

/// Signature shared by every variant, for a given reference type.
pub type UniqueTypesFn<R> = fn(&[R]) -> Vec<R>;

/// Get all variants compiled into this build, reference implementation first
pub fn available_variants<R: Identity + Clone>() -> Vec<VariantInfo<UniqueTypesFn<R>>> {
    let mut variants: Vec<VariantInfo<UniqueTypesFn<R>>> = vec![
        VariantInfo {
            name: "original",
            description: "Identity scan below 8 elements, insertion-ordered map above",
            function: unique_types::<R>,
        },
        VariantInfo {
            name: "identity_scan",
            description: "Linear identity scan at every size",
            function: unique_types_scan::<R>,
        },
        VariantInfo {
            name: "identity_keyed",
            description: "IndexMap keyed by instance identity at every size",
            function: unique_types_keyed::<R>,
        },
        VariantInfo {
            name: "seen_set",
            description: "FxHashSet of seen keys appending straight to the output",
            function: unique_types_seen_set::<R>,
        },
        VariantInfo {
            name: "pooled",
            description: "Threshold dispatch reusing a thread-local scratch set",
            function: unique_types_pooled::<R>,
        },
    ];

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-seen_set",
            description: "C open-addressing pointer set",
            function: unique_types_c::<R>,
        });
    }

    variants
}
