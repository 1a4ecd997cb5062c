//! Benchmark runner: scenario scheduling, consistency checks, CSV export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, error, info};

use super::bench::{shuffle, unit_name};
use super::timer::{measure_variants, VariantResult};
use crate::config::{BenchConfig, Scenario};
use crate::error::{BenchError, Result};
use crate::registry::AlgorithmRunner;

/// Results of every variant for one scenario
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub results: Vec<VariantResult>,
}

/// Results of one algorithm across all scenarios, in configured order
#[derive(Debug, Clone)]
pub struct AlgorithmReport {
    pub algorithm: &'static str,
    pub scenarios: Vec<ScenarioReport>,
}

/// Verify an algorithm, then time all its variants on every scenario.
///
/// Scenarios run in a seeded random order; reports come back in the
/// configured order.
pub fn run_algorithm(algo: &dyn AlgorithmRunner, config: &BenchConfig) -> Result<AlgorithmReport> {
    algo.verify()?;
    info!(algorithm = algo.name(), "all variants verified");

    let mut order: Vec<usize> = (0..config.scenarios.len()).collect();
    shuffle(&mut order, config.seed);

    let mut slots: Vec<Option<ScenarioReport>> = vec![None; config.scenarios.len()];
    for idx in order {
        let scenario = config.scenarios[idx];
        let batch = config.batch_size(&scenario);
        let seed = config.seed.wrapping_add(idx as u64);
        info!(algorithm = algo.name(), %scenario, len = scenario.len(), "measuring");
        debug!(batch, runs = config.timing.runs_per_variant, "batch size");

        let closures = algo.get_variant_closures(&scenario, batch, seed);
        let results = measure_variants(closures, scenario.iterations, &config.timing, seed);
        check_result_counts(&scenario, &results)?;

        slots[idx] = Some(ScenarioReport { scenario, results });
    }

    Ok(AlgorithmReport {
        algorithm: algo.name(),
        scenarios: slots.into_iter().flatten().collect(),
    })
}

/// Every variant must report the same result count as the first (reference)
/// variant.
pub fn check_result_counts(scenario: &Scenario, results: &[VariantResult]) -> Result<()> {
    let Some(reference) = results.first() else {
        return Ok(());
    };
    let expected = reference.result_count.unwrap_or(0);

    for result in &results[1..] {
        let actual = result.result_count.unwrap_or(0);
        if actual != expected {
            error!(variant = %result.name, %scenario, expected, actual, "result count mismatch");
            return Err(BenchError::ResultMismatch {
                variant: result.name.clone(),
                scenario: scenario.to_string(),
                expected,
                actual,
            });
        }
    }

    Ok(())
}

/// Per-variant average for CSV export
#[derive(Debug, Clone, PartialEq)]
pub struct RawTimingData {
    pub algo_name: String,
    pub variant_name: String,
    pub scenario: Scenario,
    pub avg: f64,
    pub result_count: Option<usize>,
}

/// Flatten reports into CSV rows
pub fn raw_timings(reports: &[AlgorithmReport]) -> Vec<RawTimingData> {
    reports
        .iter()
        .flat_map(|report| {
            report.scenarios.iter().flat_map(move |s| {
                s.results.iter().map(move |r| RawTimingData {
                    algo_name: report.algorithm.to_string(),
                    variant_name: r.name.clone(),
                    scenario: s.scenario,
                    avg: r.avg_nanos_f64,
                    result_count: r.result_count,
                })
            })
        })
        .collect()
}

/// Export timing data to a CSV file
pub fn export_csv(path: &Path, data: &[RawTimingData]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_csv(&mut out, data)?;
    out.flush()?;
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, data: &[RawTimingData]) -> std::io::Result<()> {
    writeln!(
        out,
        "algorithm,variant,compiler,unique,duplicate_factor,input_size,iterations,avg_{},result_count",
        unit_name()
    )?;

    for entry in data {
        let compiler = if entry.variant_name.starts_with("c-") {
            crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
        } else {
            ""
        };

        writeln!(
            out,
            "{},{},{},{},{},{},{},{:.2},{}",
            entry.algo_name,
            entry.variant_name,
            compiler,
            entry.scenario.unique,
            entry.scenario.duplicate_factor,
            entry.scenario.len(),
            entry.scenario.iterations,
            entry.avg,
            entry.result_count.map(|c| c.to_string()).unwrap_or_default()
        )?;
    }

    Ok(())
}
