//! # Identity Dedup
//!
//! Order-preserving deduplication of object references by instance identity,
//! with a harness that benchmarks the implementation variants against each
//! other.
//!
//! ```
//! use std::rc::Rc;
//!
//! let (a, b) = (Rc::new(1), Rc::new(1));
//! let unique = identity_dedup::dedupe(&[a.clone(), b.clone(), a.clone()]);
//!
//! assert_eq!(unique.len(), 2);
//! assert!(Rc::ptr_eq(&unique[0], &a));
//! assert!(Rc::ptr_eq(&unique[1], &b));
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod registry;
pub mod utils;

pub use dedup::identity::{Identity, InstanceId};
pub use dedup::unique_types::{unique_types as dedupe, Deduplicator, DEFAULT_THRESHOLD};
pub use error::{BenchError, Result};

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{BenchConfig, Scenario};
    pub use crate::dedup::identity::{Identity, InstanceId};
    pub use crate::dedup::unique_types::{unique_types, Deduplicator};
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
}
