//! Crossover sweep for the scan/keyed threshold.
//!
//! The dispatcher's threshold is a tuning constant: where a linear identity
//! scan stops beating the keyed map depends on the machine and the map
//! implementation. The sweep measures both strategies at every length up to
//! a bound and reports where the keyed strategy stops losing.

use super::code::{unique_types_keyed, unique_types_scan, UniqueTypesFn};
use super::{TestType, TypeRef};
use crate::registry::VariantClosure;
use crate::utils::bench::{per_call, shuffle};
use crate::utils::timer::{measure_variants, TimingConfig};
use std::hint::black_box;
use std::sync::Arc;

/// Timings for one input length
#[derive(Debug, Clone)]
pub struct CrossoverPoint {
    pub len: usize,
    pub scan_avg: f64,
    pub keyed_avg: f64,
}

#[derive(Debug, Clone)]
pub struct CrossoverReport {
    pub points: Vec<CrossoverPoint>,
    /// Smallest length from which the keyed strategy is never slower
    pub crossover: Option<usize>,
}

/// Input of `len` elements over `max(1, len / 2)` instances, shuffled.
fn sweep_input(len: usize, seed: u64) -> Vec<TypeRef> {
    let instances: Vec<TypeRef> = (0..(len / 2).max(1))
        .map(|id| Arc::new(TestType { id }))
        .collect();
    let mut input: Vec<TypeRef> = instances.iter().cycle().take(len).cloned().collect();
    shuffle(&mut input, seed);
    input
}

fn timed<'a>(
    name: &'static str,
    func: UniqueTypesFn<TypeRef>,
    input: &'a [TypeRef],
    batch: usize,
) -> VariantClosure<'a> {
    VariantClosure {
        name,
        description: "",
        run: Box::new(move || {
            let (elapsed, count) = crate::measure!({
                let mut count = 0;
                for _ in 0..batch {
                    count = black_box(func(black_box(input))).len();
                }
                count
            });
            (per_call(elapsed, batch), Some(count))
        }),
    }
}

/// Smallest length from which `keyed <= scan` holds for every measured point.
pub fn crossover_length(points: &[CrossoverPoint]) -> Option<usize> {
    let mut crossover = None;
    for point in points.iter().rev() {
        if point.keyed_avg <= point.scan_avg {
            crossover = Some(point.len);
        } else {
            break;
        }
    }
    crossover
}

/// Measure both strategies for every length in `1..=max_len`.
pub fn find_crossover(max_len: usize, batch: usize, config: &TimingConfig, seed: u64) -> CrossoverReport {
    let batch = batch.max(1);
    let mut points = Vec::with_capacity(max_len);

    for len in 1..=max_len {
        let input = sweep_input(len, seed ^ len as u64);
        let variants = vec![
            timed("identity_scan", unique_types_scan::<TypeRef>, &input, batch),
            timed("identity_keyed", unique_types_keyed::<TypeRef>, &input, batch),
        ];
        let results = measure_variants(variants, batch, config, seed.wrapping_add(len as u64));

        let point = CrossoverPoint {
            len,
            scan_avg: results[0].avg_nanos_f64,
            keyed_avg: results[1].avg_nanos_f64,
        };
        tracing::debug!(len, scan = point.scan_avg, keyed = point.keyed_avg, "crossover point");
        points.push(point);
    }

    let crossover = crossover_length(&points);
    CrossoverReport { points, crossover }
}
