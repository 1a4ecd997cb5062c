//! Deduplication by instance identity.

pub mod identity;
pub mod unique_types;
