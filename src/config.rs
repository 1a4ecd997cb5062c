//! Benchmark configuration: scenarios and run settings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::BenchError;
use crate::utils::bench::time_seed;
use crate::utils::timer::TimingConfig;

/// One benchmark input shape: `unique` instances, each appearing
/// `duplicate_factor` times, deduplicated `iterations` times per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub unique: usize,
    pub duplicate_factor: usize,
    pub iterations: usize,
}

impl Scenario {
    pub const fn new(unique: usize, duplicate_factor: usize, iterations: usize) -> Self {
        Self {
            unique,
            duplicate_factor,
            iterations,
        }
    }

    /// Length of the input array
    pub fn len(&self) -> usize {
        self.unique * self.duplicate_factor
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}@{}",
            self.unique, self.duplicate_factor, self.iterations
        )
    }
}

/// Iterations used when the textual form omits them.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Parses `UNIQUExFACTOR[@ITERATIONS]`, e.g. `50x5` or `50x5@10000`.
impl FromStr for Scenario {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BenchError::InvalidScenario(s.to_string());
        let number = |part: &str| -> Result<usize, BenchError> {
            match part.trim().parse::<usize>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(n) => Ok(n),
            }
        };

        let (shape, iterations) = match s.split_once('@') {
            Some((shape, iterations)) => (shape, number(iterations)?),
            None => (s, DEFAULT_ITERATIONS),
        };
        let (unique, factor) = shape
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;

        Ok(Self::new(number(unique)?, number(factor)?, iterations))
    }
}

/// Two inputs on either side of the crossover threshold, then the reference
/// benchmark's sizes (15 to 10000 elements) up to a heavily duplicated
/// stress case.
pub const DEFAULT_SCENARIOS: [Scenario; 11] = [
    Scenario::new(3, 2, 100_000),
    Scenario::new(4, 2, 100_000),
    Scenario::new(5, 3, 100_000),
    Scenario::new(7, 3, 100_000),
    Scenario::new(8, 3, 50_000),
    Scenario::new(10, 3, 50_000),
    Scenario::new(50, 5, 10_000),
    Scenario::new(100, 5, 5_000),
    Scenario::new(500, 3, 1_000),
    Scenario::new(1000, 3, 500),
    Scenario::new(2000, 5, 100),
];

/// Settings for a benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub scenarios: Vec<Scenario>,
    pub timing: TimingConfig,
    /// Seed for test arrays and sample scheduling
    pub seed: u64,
    /// Where to write per-variant averages, if anywhere
    pub csv_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            scenarios: DEFAULT_SCENARIOS.to_vec(),
            timing: TimingConfig::default(),
            seed: time_seed(),
            csv_path: None,
        }
    }
}

impl BenchConfig {
    /// Calls timed per sample so that all samples together cover the
    /// scenario's iteration count.
    pub fn batch_size(&self, scenario: &Scenario) -> usize {
        (scenario.iterations / self.timing.runs_per_variant.max(1)).max(1)
    }
}
