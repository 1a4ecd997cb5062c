//! Shared measurement utilities.
//!
//! By default (`cpu_cycles` feature), measurements use CPU cycle counters
//! for precise micro-benchmarking. Use `--features use_time` or
//! `--no-default-features` to use wall-clock time instead.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// ============================================================================
// Measurement abstraction: cycles or time depending on feature flags
// ============================================================================
//
// Use CPU cycles if: cpu_cycles is enabled AND use_time is NOT enabled
// Use wall-clock time if: use_time is enabled OR cpu_cycles is disabled

/// Measurement value type - cycles (u64) or Duration depending on feature
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Measurement = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Measurement = Duration;

/// Start marker returned by [`now`]
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Start = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Start = std::time::Instant;

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn now() -> Start {
    crate::utils::cycles::read_cycles()
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn now() -> Start {
    std::time::Instant::now()
}

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn elapsed(start: Start) -> Measurement {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn elapsed(start: Start) -> Measurement {
    start.elapsed()
}

/// Raw value of a measurement: cycles, or nanoseconds in wall-clock mode
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub fn to_nanos(m: Measurement) -> u64 {
    m
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub fn to_nanos(m: Measurement) -> u64 {
    m.as_nanos() as u64
}

/// Average of a measurement taken over `calls` calls
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub fn per_call(m: Measurement, calls: usize) -> Measurement {
    m / calls.max(1) as u64
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub fn per_call(m: Measurement, calls: usize) -> Measurement {
    m / u32::try_from(calls.max(1)).unwrap_or(u32::MAX)
}

/// Get the measurement unit name
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub const fn unit_name() -> &'static str {
    crate::utils::cycles::UNIT
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub const fn unit_name() -> &'static str {
    "ns"
}

/// Format a statistic for display.
///
/// Statistics are stored as `Duration`s whose nanosecond count holds the raw
/// measurement, so in cycle mode the value is printed with the cycle unit.
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub fn format_measurement(d: Duration) -> String {
    format!("{} {}", d.as_nanos(), unit_name())
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub fn format_measurement(d: Duration) -> String {
    format!("{:?}", d)
}

/// Time an expression, returning `(measurement, value)`.
///
/// The value goes through `black_box` before the clock stops so the work
/// cannot be sunk past the measurement.
#[macro_export]
macro_rules! measure {
    ($e:expr) => {{
        let start = $crate::utils::bench::now();
        let value = ::std::hint::black_box($e);
        let elapsed = $crate::utils::bench::elapsed(start);
        (elapsed, value)
    }};
}

// ============================================================================
// Randomization
// ============================================================================

/// Seeded RNG shared by test arrays and sample schedules
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Fisher-Yates shuffle with a fresh seeded RNG
pub fn shuffle<T>(slice: &mut [T], seed: u64) {
    let mut rng = seeded_rng(seed);
    shuffle_with_rng(slice, &mut rng);
}

/// Shuffle using an existing RNG (allows sequential shuffles with state preserved)
pub fn shuffle_with_rng<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    slice.shuffle(rng);
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}
