//! CLI for the identity dedup benchmarks.
//!
//! Usage:
//!   dedup-bench                      # Run every algorithm on the default scenarios
//!   dedup-bench --list               # List available algorithms
//!   dedup-bench unique_types         # Run one algorithm
//!   dedup-bench --scenarios 5x3,50x5@20000 --seed 42
//!   dedup-bench --crossover 32       # Sweep scan vs keyed up to 32 elements

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use identity_dedup::config::{BenchConfig, Scenario, DEFAULT_SCENARIOS};
use identity_dedup::dedup::unique_types::{bench::find_crossover, C_IMPL_AVAILABLE, DEFAULT_THRESHOLD};
use identity_dedup::registry::build_registry;
use identity_dedup::tui;
use identity_dedup::utils::runner::{export_csv, raw_timings, run_algorithm};
use identity_dedup::utils::timer::{PinStrategy, TimingConfig};
use identity_dedup::utils::time_seed;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PinArg {
    /// Pin once for the whole measurement
    Global,
    /// Pin around every sample
    PerExecution,
    /// Never pin
    Off,
}

impl From<PinArg> for PinStrategy {
    fn from(arg: PinArg) -> Self {
        match arg {
            PinArg::Global => PinStrategy::Global,
            PinArg::PerExecution => PinStrategy::PerExecution,
            PinArg::Off => PinStrategy::Disabled,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dedup-bench")]
#[command(about = "Benchmark identity deduplication variants", long_about = None)]
#[command(version)]
struct Cli {
    /// Algorithm to run (omit for all)
    algorithm: Option<String>,

    /// List all available algorithms
    #[arg(short, long)]
    list: bool,

    /// Comma-separated scenarios, UNIQUExFACTOR[@ITERATIONS]
    #[arg(long, value_delimiter = ',')]
    scenarios: Option<Vec<Scenario>>,

    /// Measurement samples per variant
    #[arg(short, long, default_value_t = 30)]
    runs: usize,

    /// Warmup samples per variant
    #[arg(long, default_value_t = 10)]
    warmup: usize,

    /// Random seed for reproducible runs (default: time-based)
    #[arg(long)]
    seed: Option<u64>,

    /// CPU pinning strategy
    #[arg(long, value_enum, default_value_t = PinArg::PerExecution)]
    pin: PinArg,

    /// Export per-variant averages to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Sweep scan vs keyed for every length up to MAX_LEN
    #[arg(long, value_name = "MAX_LEN")]
    crossover: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            scenarios: self
                .scenarios
                .clone()
                .unwrap_or_else(|| DEFAULT_SCENARIOS.to_vec()),
            timing: TimingConfig {
                runs_per_variant: self.runs.max(1),
                warmup_iterations: self.warmup,
                pin_strategy: self.pin.into(),
            },
            seed: self.seed.unwrap_or_else(time_seed),
            csv_path: self.csv.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global tracing subscriber was already set");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> identity_dedup::Result<()> {
    let registry = build_registry();

    if cli.list {
        tui::print_available_algorithms(&registry);
        return Ok(());
    }

    let config = cli.bench_config();
    info!(seed = config.seed, scenarios = config.scenarios.len(), "benchmark configuration");
    if !C_IMPL_AVAILABLE {
        warn!("no supported C compiler at build time; c-seen_set variant skipped");
    }

    tui::print_header();

    if let Some(max_len) = cli.crossover {
        let report = find_crossover(max_len, 10_000 / config.timing.runs_per_variant, &config.timing, config.seed);
        tui::print_crossover(&report, DEFAULT_THRESHOLD);
        return Ok(());
    }

    let algorithms = match cli.algorithm.as_deref() {
        Some(name) => vec![registry.find(name)?],
        None => registry.all().iter().map(|a| a.as_ref()).collect(),
    };

    let mut reports = Vec::with_capacity(algorithms.len());
    for algo in algorithms {
        tui::print_algo_info_box(algo);
        let report = run_algorithm(algo, &config)?;
        tui::print_report(&report, config.timing.runs_per_variant);
        reports.push(report);
    }

    if let Some(path) = &config.csv_path {
        export_csv(path, &raw_timings(&reports))?;
        info!(path = %path.display(), "raw timings written");
    }

    println!("Note: Speedup is relative to the first variant ('original').");
    Ok(())
}
