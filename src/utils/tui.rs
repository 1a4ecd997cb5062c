//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use super::bench::format_measurement;
use super::runner::{AlgorithmReport, ScenarioReport};
use crate::config::Scenario;
use crate::dedup::unique_types::bench::CrossoverReport;
use crate::registry::{AlgorithmRegistry, AlgorithmRunner, BenchmarkResult};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

fn is_c_variant(name: &str) -> bool {
    name.starts_with("c-") || name.starts_with("c_")
}

/// Sorting priority: original (0), Rust (1), C by compiler then name (2)
fn variant_sort_key(result: &BenchmarkResult) -> (u8, String, String) {
    let name = result.name.to_lowercase();

    if name == "original" {
        (0, String::new(), String::new())
    } else if is_c_variant(&name) {
        let compiler = crate::utils::C_COMPILER_NAME
            .unwrap_or("unknown")
            .to_lowercase();
        (2, compiler, name)
    } else {
        (1, name, String::new())
    }
}

/// Sort variants: original first, then Rust, then C
pub fn sort_variants(results: &mut [BenchmarkResult]) {
    results.sort_by_key(variant_sort_key);
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print algorithm info box
pub fn print_algo_info_box(algo: &dyn AlgorithmRunner) {
    let max_content_width = get_term_width().saturating_sub(4).max(40);

    let lines = [
        format!("Algorithm: {}", algo.name()),
        format!("Category:  {}", algo.category()),
        algo.description().to_string(),
        format!("Variants: {}", algo.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Header line of a scenario table
pub fn scenario_heading(scenario: &Scenario) -> String {
    format!(
        "Array size: {} (unique: {}, duplication factor: {}x, {} calls)",
        scenario.len(),
        scenario.unique,
        scenario.duplicate_factor,
        scenario.iterations
    )
}

/// Print results table for a single scenario
pub fn print_results_table(report: &ScenarioReport, runs: usize) {
    if report.results.is_empty() {
        return;
    }

    let mut results = report.results.clone();
    sort_variants(&mut results);

    let term_width = get_term_width();
    let variant_col_width = term_width.saturating_sub(72).max(15);
    let table_width = variant_col_width + 64 + 6;

    let baseline = results.first().map(|r| r.avg_nanos_f64).unwrap_or(1.0);

    println!("  {} ({} runs)", scenario_heading(&report.scenario), runs);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>8}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "Unique",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in &results {
        let speedup = if result.avg_nanos_f64 > 0.0 {
            baseline / result.avg_nanos_f64
        } else {
            0.0
        };

        let display_name = if is_c_variant(&result.name) {
            match crate::utils::C_COMPILER_NAME {
                Some(c) => format!("{} ({})", result.name, c),
                None => result.name.clone(),
            }
        } else {
            result.name.clone()
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>8}",
            truncate(&display_name, variant_col_width),
            format_measurement(result.avg_time),
            format_measurement(result.min_time),
            format_measurement(result.max_time),
            speedup,
            result.cv() * 100.0,
            result
                .result_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print every scenario table of an algorithm report
pub fn print_report(report: &AlgorithmReport, runs: usize) {
    for scenario in &report.scenarios {
        print_results_table(scenario, runs);
    }
}

/// Print the scan/keyed sweep with the measured crossover
pub fn print_crossover(report: &CrossoverReport, threshold: usize) {
    println!("  Scan vs keyed crossover");
    println!("  {}", "─".repeat(46));
    println!(
        "  {:>6} {:>14} {:>14} {:>8}",
        "Length", "Scan", "Keyed", "Faster"
    );
    println!("  {}", "─".repeat(46));

    for point in &report.points {
        let faster = if point.keyed_avg <= point.scan_avg {
            "keyed"
        } else {
            "scan"
        };
        println!(
            "  {:>6} {:>14.1} {:>14.1} {:>8}",
            point.len, point.scan_avg, point.keyed_avg, faster
        );
    }
    println!();

    match report.crossover {
        Some(len) => println!(
            "  Keyed map never slower from length {} (current threshold: {})",
            len, threshold
        ),
        None => println!(
            "  Scan stays competitive over the whole sweep (current threshold: {})",
            threshold
        ),
    }
    println!();
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Identity Dedup Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
        println!("  {:<20} variants: {}", "", algo.available_variants().join(", "));
    }
}
