//! # Console Reporting Module
//!
//! This module prints the matrix results to the console: one line per
//! cell in the summary table, and full output dumps for failed jobs.
//! The runner never fails fast, so the summary always covers the whole
//! matrix.

use crate::core::matrix::MatrixCell;
use crate::core::models::JobResult;
use colored::*;

/// Prints the planned cells without running them (`--dry-run`).
pub fn print_plan(cells: &[MatrixCell]) {
    println!("{}", "--- Execution Plan ---".bold());
    for cell in cells {
        println!("  - {}", cell.job_name());
    }
    println!("{} jobs planned.", cells.len());
}

/// Prints a formatted summary of all matrix results.
///
/// # Output Format
/// ```text
/// --- Matrix Summary ---
///   - Passed   | standard/afl                             |      12.34s  (cached deps)
///   - Failed   | bug/honggfuzz (Build Script Failure)     |       3.21s
///   - Skipped  | oss-fuzz/libfuzzer                       |         N/A
/// ```
pub fn print_summary(results: &[JobResult]) {
    println!("\n{}", "--- Matrix Summary ---".bold());

    for result in results {
        let duration_str = result
            .duration()
            .map(|d| format!("{:.2}s", d.as_secs_f64()))
            .unwrap_or_else(|| "N/A".to_string());

        let name = match result {
            JobResult::Failed { reason, .. } => {
                format!("{} ({})", result.job_name(), reason.describe())
            }
            _ => result.job_name(),
        };

        let status_colored = match result {
            JobResult::Passed { .. } => result.status_str().green(),
            JobResult::Failed { .. } => result.status_str().red(),
            JobResult::Skipped { .. } => result.status_str().dimmed(),
        };

        let cache_str = if result.cache_hit() { "  (cached deps)" } else { "" };

        println!(
            "  - {:<8} | {:<48} | {:>10}{}",
            status_colored, name, duration_str, cache_str
        );
    }

    let passed = results.iter().filter(|r| r.is_passed()).count();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let skipped = results.len() - passed - failed;
    println!(
        "\n{} total, {} passed, {} failed, {} skipped",
        results.len(),
        passed,
        failed,
        skipped
    );
}

/// Prints the full captured output for every failed job. Cells are
/// independent, so each failure is reported on its own.
pub fn print_failure_details(failures: &[&JobResult]) {
    if failures.is_empty() {
        return;
    }

    println!("\n{}", "--- FAILED JOBS ---".red().bold());
    println!("{}", "-".repeat(80));

    for (i, result) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            failures.len(),
            "Failure in job".red(),
            result.job_name().cyan()
        );

        if let JobResult::Failed { output, reason, .. } = result {
            println!("\n--- {} ---\n", reason.describe().yellow());
            if output.trim().is_empty() {
                println!("(no output captured)");
            } else {
                println!("{}", output.trim_end());
            }
            println!("\n{}", "-".repeat(80));
        }
    }
}
