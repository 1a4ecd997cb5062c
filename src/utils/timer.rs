//! Unified timing system for micro-benchmarks.
//!
//! - Support for both CPU cycles and wall-clock time (via features)
//! - CPU core pinning for stable measurements
//! - Randomized variant interleaving to avoid ordering bias

use std::hint::black_box;
use std::time::Duration;

use super::bench::{shuffle, to_nanos, Measurement};
use super::cpu_affinity::CpuPinGuard;
use crate::registry::VariantClosure;

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements (minimal overhead)
    Global,
    /// Pin/unpin around each sample
    #[default]
    PerExecution,
    /// Never pin
    Disabled,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup samples before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
        }
    }
}

/// Result from measuring a single variant.
///
/// Times are per call. In cycle mode the `Duration`s carry raw cycle counts
/// in their nanosecond field; use `bench::format_measurement` to print them.
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    pub avg_time: Duration,
    /// Precise average as f64
    pub avg_nanos_f64: f64,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Calls represented by the measurement
    pub iterations: usize,
    /// Output length reported by the variant
    pub result_count: Option<usize>,
}

impl VariantResult {
    /// Coefficient of variation (std dev / mean)
    pub fn cv(&self) -> f64 {
        if self.avg_nanos_f64 > 0.0 {
            self.std_dev.as_nanos() as f64 / self.avg_nanos_f64
        } else {
            0.0
        }
    }
}

/// Measure multiple variants with randomized execution order.
///
/// 1. Warms up all variants
/// 2. Shuffles a schedule of `(variant, sample)` tasks with `seed`
/// 3. Runs each task under the configured pinning
/// 4. Returns one `VariantResult` per variant, in input order
pub fn measure_variants(
    mut variants: Vec<VariantClosure>,
    iterations: usize,
    config: &TimingConfig,
    seed: u64,
) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant.max(1);

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(samples))
        .collect();
    shuffle(&mut tasks, seed);

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_counts: Vec<Option<usize>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin =
            (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed, count) = (variant.run)();

        measurements[variant_idx].push(elapsed);
        result_counts[variant_idx] = count;
    }

    variants
        .into_iter()
        .zip(measurements)
        .zip(result_counts)
        .map(|((variant, times), count)| {
            compute_variant_result(variant.name, variant.description, &times, iterations, count)
        })
        .collect()
}

/// Compute statistics from raw measurements
fn compute_variant_result(
    name: &'static str,
    description: &'static str,
    measurements: &[Measurement],
    iterations: usize,
    result_count: Option<usize>,
) -> VariantResult {
    let mut sorted: Vec<u64> = measurements.iter().map(|m| to_nanos(*m)).collect();
    sorted.sort_unstable();

    let (Some(&min_ns), Some(&max_ns)) = (sorted.first(), sorted.last()) else {
        return VariantResult {
            name: name.to_string(),
            description: description.to_string(),
            avg_time: Duration::ZERO,
            avg_nanos_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            iterations,
            result_count: None,
        };
    };

    let median_ns = sorted[sorted.len() / 2];
    let avg = sorted.iter().map(|&n| n as f64).sum::<f64>() / sorted.len() as f64;
    let variance = sorted
        .iter()
        .map(|&n| {
            let diff = n as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / (sorted.len() - 1).max(1) as f64;

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_time: Duration::from_nanos(avg as u64),
        avg_nanos_f64: avg,
        median_time: Duration::from_nanos(median_ns),
        min_time: Duration::from_nanos(min_ns),
        max_time: Duration::from_nanos(max_ns),
        std_dev: Duration::from_nanos(variance.sqrt() as u64),
        iterations,
        result_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure;

    fn quick_config(pin_strategy: PinStrategy) -> TimingConfig {
        TimingConfig {
            runs_per_variant: 5,
            warmup_iterations: 2,
            pin_strategy,
        }
    }

    #[test]
    fn test_measure_variants_empty() {
        let results = measure_variants(vec![], 1000, &TimingConfig::default(), 1);
        assert!(results.is_empty());
    }

    #[test]
    fn test_measure_variants_single() {
        let variants = vec![VariantClosure {
            name: "test",
            description: "Test variant",
            run: Box::new(|| {
                let (elapsed, value) = measure!(vec![1u8; 42]);
                (elapsed, Some(value.len()))
            }),
        }];

        let results = measure_variants(variants, 100, &quick_config(PinStrategy::Global), 7);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "test");
        assert_eq!(results[0].result_count, Some(42));
        assert!(results[0].min_time <= results[0].max_time);
    }

    #[test]
    fn test_measure_variants_keeps_input_order() {
        let mut calls = [0usize; 2];
        {
            let (first, second) = calls.split_at_mut(1);
            let variants = vec![
                VariantClosure {
                    name: "fast",
                    description: "Fast variant",
                    run: Box::new(|| {
                        first[0] += 1;
                        let (elapsed, _) = measure!(1);
                        (elapsed, Some(1))
                    }),
                },
                VariantClosure {
                    name: "slow",
                    description: "Slow variant",
                    run: Box::new(|| {
                        second[0] += 1;
                        let (elapsed, _) = measure!(vec![0u8; 1000]);
                        (elapsed, Some(2))
                    }),
                },
            ];

            let results =
                measure_variants(variants, 100, &quick_config(PinStrategy::PerExecution), 3);
            assert_eq!(results[0].name, "fast");
            assert_eq!(results[1].name, "slow");
            assert_eq!(results[0].result_count, Some(1));
            assert_eq!(results[1].result_count, Some(2));
        }

        // Warmup plus samples, per variant.
        assert_eq!(calls, [7, 7]);
    }

    #[test]
    fn test_statistics() {
        #[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
        let raw: Vec<Measurement> = vec![10, 20, 30, 40];
        #[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
        let raw: Vec<Measurement> = [10, 20, 30, 40].map(Duration::from_nanos).to_vec();

        let result = compute_variant_result("v", "d", &raw, 4, Some(3));
        assert_eq!(result.min_time, Duration::from_nanos(10));
        assert_eq!(result.max_time, Duration::from_nanos(40));
        assert_eq!(result.median_time, Duration::from_nanos(30));
        assert_eq!(result.avg_nanos_f64, 25.0);
        assert!(result.cv() > 0.0);
    }
}
