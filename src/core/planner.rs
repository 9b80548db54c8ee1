//! # Execution Planner Module
//!
//! This module turns a validated pipeline declaration into the concrete
//! list of matrix cells to run: it expands the cross product, applies
//! optional fuzzer/benchmark-type filters and, in CI, shards the cell
//! list across multiple runners.

use crate::core::config::MatrixConfig;
use crate::core::matrix::{self, BenchmarkType, MatrixCell};
use anyhow::{bail, Result};

/// A complete execution plan for one invocation of the runner.
#[derive(Debug)]
pub struct MatrixPlan {
    /// The cells this runner will execute.
    pub cells_to_run: Vec<MatrixCell>,
    /// The size of the full cross product, before filters and sharding.
    pub total_cells: usize,
    /// The number of cells removed by `--fuzzer` / `--benchmark-type`.
    pub filtered_count: usize,
    /// Whether the cells are sharded across multiple CI runners.
    pub is_distributed: bool,
}

/// Creates an execution plan for the given declaration.
///
/// # Arguments
/// * `config` - The validated pipeline declaration
/// * `fuzzer_filter` - Restrict the plan to a single fuzzer identifier
/// * `type_filter` - Restrict the plan to a single benchmark type
/// * `total_runners` - Optional runner count for distributed execution
/// * `runner_index` - Optional 0-based index of this runner
pub fn plan_matrix(
    config: &MatrixConfig,
    fuzzer_filter: Option<&str>,
    type_filter: Option<BenchmarkType>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<MatrixPlan> {
    if let Some(fuzzer) = fuzzer_filter {
        if !config.matrix.fuzzers.iter().any(|f| f == fuzzer) {
            bail!("Unknown fuzzer '{}' (not declared in [matrix].fuzzers)", fuzzer);
        }
    }
    if let Some(benchmark_type) = type_filter {
        if !config.matrix.benchmark_types.contains(&benchmark_type) {
            bail!(
                "Benchmark type '{}' is not declared in [matrix].benchmark_types",
                benchmark_type
            );
        }
    }

    let cells = matrix::expand(&config.matrix.fuzzers, &config.matrix.benchmark_types);
    let total_cells = cells.len();

    let filtered: Vec<MatrixCell> = cells
        .into_iter()
        .filter(|cell| fuzzer_filter.map_or(true, |f| cell.fuzzer == f))
        .filter(|cell| type_filter.map_or(true, |t| cell.benchmark_type == t))
        .collect();
    let filtered_count = total_cells - filtered.len();

    let (cells_to_run, is_distributed) =
        if let (Some(total), Some(index)) = (total_runners, runner_index) {
            if total == 0 {
                bail!("Total runners must be at least 1.");
            }
            if index >= total {
                bail!("Runner index must be less than total runners.");
            }
            let sharded: Vec<MatrixCell> = filtered
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, cell)| cell)
                .collect();
            (sharded, true)
        } else {
            if total_runners.is_some() || runner_index.is_some() {
                bail!("Both --total-runners and --runner-index must be provided.");
            }
            (filtered, false)
        };

    Ok(MatrixPlan {
        cells_to_run,
        total_cells,
        filtered_count,
        is_distributed,
    })
}
