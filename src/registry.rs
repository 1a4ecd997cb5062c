//! Algorithm registry for dynamic algorithm discovery and execution.
//!
//! Each algorithm exposes its variants as ready-to-time closures, so the
//! runner can measure any of them without knowing their signatures.

use crate::config::Scenario;
use crate::error::{BenchError, Result};
use crate::utils::bench::Measurement;
use crate::utils::timer::VariantResult;

/// Result from running a variant benchmark (alias for VariantResult)
pub type BenchmarkResult = VariantResult;

/// A closure that times one batch of calls of a variant
pub struct VariantClosure<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// Returns (per-call measurement, result length of the last call).
    /// Timing happens inside the closure to eliminate Fn trait overhead.
    pub run: Box<dyn FnMut() -> (Measurement, Option<usize>) + 'a>,
}

/// Trait that all algorithm benchmarkers must implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the algorithm (e.g., "unique_types")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "dedup")
    fn category(&self) -> &'static str;

    /// Get list of available variant names
    fn available_variants(&self) -> Vec<&'static str>;

    /// Build one closure per variant over the scenario's input. Each call of
    /// a closure times `batch` consecutive executions.
    fn get_variant_closures(
        &self,
        scenario: &Scenario,
        batch: usize,
        seed: u64,
    ) -> Vec<VariantClosure<'_>>;

    /// Verify every variant against the reference implementation
    fn verify(&self) -> Result<()>;
}

/// Global registry of all algorithms
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find algorithm by name
    pub fn find(&self, name: &str) -> Result<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
            .ok_or_else(|| BenchError::UnknownAlgorithm {
                name: name.to_string(),
                available: self.list_names(),
            })
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.category() == category)
            .map(|a| a.as_ref())
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all algorithms
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(crate::dedup::unique_types::UniqueTypesRunner);

    registry
}
