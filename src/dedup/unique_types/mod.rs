//! # Unique Types
//!
//! Deduplicates a sequence of object references by instance identity,
//! keeping the first occurrence of each instance in input order:
//!
//! `[A, B, A, C, B, A] -> [A, B, C]`
//!
//! Two instances with equal contents are *not* duplicates; only references
//! to the same instance are.
//!
//! ## Optimization Strategies
//!
//! - **Identity scan**: O(n²), but no keys, hashing, or extra allocation;
//!   fastest for a handful of elements
//! - **Identity-keyed map**: O(n) with an insertion-ordered map
//! - **Seen set**: O(n) with a plain hash set, appending to the output directly
//! - **Scratch reuse**: keep the hash set between calls in hot loops
//! - **Native**: open addressing over raw pointers in C

pub mod bench;
pub mod code;
pub mod test;

pub use code::*;

use crate::config::Scenario;
use crate::registry::{AlgorithmRunner, VariantClosure};
use crate::utils::bench::{per_call, shuffle};
use std::hint::black_box;
use std::sync::Arc;

/// Test record: a heap object whose identity is its allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestType {
    pub id: usize,
}

/// Shared reference to a test record, the element type the benchmark uses
pub type TypeRef = Arc<TestType>;

/// Create `unique` records, repeat the whole list `duplicate_factor` times,
/// then shuffle with `seed`.
pub fn build_test_array(unique: usize, duplicate_factor: usize, seed: u64) -> Vec<TypeRef> {
    let objects: Vec<TypeRef> = (0..unique).map(|id| Arc::new(TestType { id })).collect();

    let mut array = Vec::with_capacity(unique * duplicate_factor);
    for _ in 0..duplicate_factor {
        array.extend(objects.iter().cloned());
    }
    shuffle(&mut array, seed);
    array
}

/// Runner for the unique_types algorithm
pub struct UniqueTypesRunner;

impl AlgorithmRunner for UniqueTypesRunner {
    fn name(&self) -> &'static str {
        "unique_types"
    }

    fn description(&self) -> &'static str {
        "Order-preserving deduplication of object references by instance identity"
    }

    fn category(&self) -> &'static str {
        "dedup"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants::<TypeRef>()
            .iter()
            .map(|v| v.name)
            .collect()
    }

    fn get_variant_closures(
        &self,
        scenario: &Scenario,
        batch: usize,
        seed: u64,
    ) -> Vec<VariantClosure<'_>> {
        let data = Arc::new(build_test_array(
            scenario.unique,
            scenario.duplicate_factor,
            seed,
        ));
        let batch = batch.max(1);

        code::available_variants::<TypeRef>()
            .into_iter()
            .map(|v| {
                let data = Arc::clone(&data);
                let func = v.function;

                VariantClosure {
                    name: v.name,
                    description: v.description,
                    run: Box::new(move || {
                        // Timing inside closure - measures the whole batch
                        let (elapsed, count) = crate::measure!({
                            let mut count = 0;
                            for _ in 0..batch {
                                count = black_box(func(black_box(data.as_slice()))).len();
                            }
                            count
                        });
                        (per_call(elapsed, batch), Some(count))
                    }),
                }
            })
            .collect()
    }

    fn verify(&self) -> crate::error::Result<()> {
        test::verify_all()
    }
}
