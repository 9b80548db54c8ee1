//! # Run Command Module
//!
//! This module implements the `run` command: gate on the trigger filter,
//! expand the fuzzer × benchmark-type matrix into an execution plan, run
//! every cell's build-and-test job in parallel and report the results.

use anyhow::{Context, Result};
use colored::*;
use futures::{stream, StreamExt};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, JobSection, MatrixConfig},
        execution,
        matrix::{BenchmarkType, MatrixCell},
        models::{FailureReason, JobResult},
        planner,
        trigger::PathFilter,
    },
    infra::{cache::DepCache, command, fs},
    reporting::{
        console::{print_failure_details, print_plan, print_summary},
        html::generate_html_report,
        json::write_json_report,
    },
};

/// Arguments of the `run` command.
#[derive(Debug)]
pub struct RunOptions {
    pub jobs: Option<usize>,
    pub config: PathBuf,
    pub project_dir: PathBuf,
    pub changed_files: Option<PathBuf>,
    pub base: Option<String>,
    pub force: bool,
    pub fuzzer: Option<String>,
    pub benchmark_type: Option<String>,
    pub total_runners: Option<usize>,
    pub runner_index: Option<usize>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub dry_run: bool,
}

/// Executes the run command.
pub async fn execute(opts: RunOptions) -> Result<ExitCode> {
    let config_path = fs::absolute_path(&opts.config)?;
    let matrix_config = config::load_matrix_config(&config_path)?;
    let project_root = fs::absolute_path(&opts.project_dir)?;

    println!("Project root: {}", project_root.display());
    println!("Pipeline declaration: {}", config_path.display());

    // Trigger gate: when a change set is supplied, the matrix only runs if
    // one of the changed paths matches a declared trigger pattern.
    if let Some(changed) = collect_changed_paths(&opts, &project_root).await? {
        let filter = PathFilter::new(&matrix_config.trigger.paths)?;
        match filter.first_match(&changed) {
            Some((path, pattern)) => {
                println!(
                    "{}",
                    format!(
                        "Pipeline triggered: '{}' matches trigger pattern '{}'",
                        path.display(),
                        pattern
                    )
                    .cyan()
                );
            }
            None if opts.force => {
                println!(
                    "{}",
                    "No changed path matches a trigger pattern; running anyway (--force)".yellow()
                );
            }
            None => {
                println!(
                    "{}",
                    "Pipeline skipped: no changed path matches a trigger pattern".green()
                );
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let type_filter = opts
        .benchmark_type
        .as_deref()
        .map(BenchmarkType::from_str)
        .transpose()?;

    let plan = planner::plan_matrix(
        &matrix_config,
        opts.fuzzer.as_deref(),
        type_filter,
        opts.total_runners,
        opts.runner_index,
    )?;

    println!(
        "Matrix: {} fuzzers x {} benchmark types = {} cells",
        matrix_config.matrix.fuzzers.len(),
        matrix_config.matrix.benchmark_types.len(),
        plan.total_cells
    );
    if plan.filtered_count > 0 {
        println!(
            "{}",
            format!("{} cells filtered out by --fuzzer/--benchmark-type", plan.filtered_count)
                .cyan()
        );
    }
    if let (Some(total), Some(index)) = (opts.total_runners, opts.runner_index) {
        println!(
            "{}",
            format!(
                "Running as runner {}/{} with {} cells",
                index + 1,
                total,
                plan.cells_to_run.len()
            )
            .bold()
        );
    }

    if plan.cells_to_run.is_empty() {
        println!("{}", "No matrix cells to run.".green());
        return Ok(ExitCode::SUCCESS);
    }

    if opts.dry_run {
        print_plan(&plan.cells_to_run);
        return Ok(ExitCode::SUCCESS);
    }

    let stop_token = setup_signal_handler();
    let jobs = opts.jobs.unwrap_or(num_cpus::get() / 2 + 1);

    let results = run_jobs(
        plan.cells_to_run,
        jobs,
        &matrix_config,
        &project_root,
        stop_token,
    )
    .await?;

    print_summary(&results);

    if let Some(report_path) = &opts.html {
        println!("\nGenerating HTML report at: {}", report_path.display());
        if let Err(e) = generate_html_report(&results, report_path) {
            eprintln!("{} {:#}", "Failed to generate HTML report:".red(), e);
        }
    }
    if let Some(report_path) = &opts.json {
        println!("Writing JSON report to: {}", report_path.display());
        if let Err(e) = write_json_report(&results, report_path) {
            eprintln!("{} {:#}", "Failed to write JSON report:".red(), e);
        }
    }

    let failures: Vec<&JobResult> = results.iter().filter(|r| r.is_failure()).collect();
    if failures.is_empty() {
        println!("\n{}", "MATRIX PASSED: all jobs succeeded".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        print_failure_details(&failures);
        anyhow::bail!("Matrix run failed: {} job(s) failed.", failures.len());
    }
}

/// Resolves the change set for the trigger gate. Returns `None` when the
/// invocation carries no change information, in which case the matrix
/// runs unconditionally.
async fn collect_changed_paths(
    opts: &RunOptions,
    project_root: &Path,
) -> Result<Option<Vec<String>>> {
    if let Some(file) = &opts.changed_files {
        return Ok(Some(fs::read_path_list(file)?));
    }
    if let Some(base) = &opts.base {
        return Ok(Some(git_changed_paths(project_root, base).await?));
    }
    Ok(None)
}

/// Asks git for the paths touched since `base`.
async fn git_changed_paths(project_root: &Path, base: &str) -> Result<Vec<String>> {
    let mut cmd = tokio::process::Command::new("git");
    cmd.arg("diff")
        .arg("--name-only")
        .arg(base)
        .current_dir(project_root);

    let (status_res, output) = command::spawn_and_capture(cmd).await;
    let status = status_res.context("Failed to execute 'git diff'")?;
    if !status.success() {
        anyhow::bail!("'git diff --name-only {}' failed:\n{}", base, output);
    }

    Ok(output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", "Shutdown requested, cancelling pending jobs...".yellow());
            token_clone.cancel();
        }
    });

    token
}

/// Runs the matrix cells in parallel. Cells are independent, so one
/// failure never cancels the others; only a shutdown signal does.
async fn run_jobs(
    cells_to_run: Vec<MatrixCell>,
    jobs: usize,
    matrix_config: &MatrixConfig,
    project_root: &Path,
    stop_token: CancellationToken,
) -> Result<Vec<JobResult>> {
    let job_cfg: Arc<JobSection> = Arc::new(matrix_config.job.clone());
    let project_root = Arc::new(project_root.to_path_buf());
    let cache = Arc::new(DepCache::open(job_cfg.cache_root(&project_root))?);
    let install_lock = Arc::new(Mutex::new(()));

    let results = stream::iter(cells_to_run.into_iter().map(|cell| {
        let job_cfg = Arc::clone(&job_cfg);
        let project_root = Arc::clone(&project_root);
        let cache = Arc::clone(&cache);
        let install_lock = Arc::clone(&install_lock);
        let stop_token = stop_token.clone();

        async move {
            if stop_token.is_cancelled() {
                return JobResult::Skipped { cell };
            }

            let run_cell = cell.clone();
            tokio::select! {
                biased;
                _ = stop_token.cancelled() => JobResult::Skipped { cell },
                res = execution::run_matrix_job(
                    run_cell,
                    &job_cfg,
                    &project_root,
                    &cache,
                    &install_lock,
                ) => match res {
                    Ok(result) => result,
                    Err(e) => JobResult::Failed {
                        cell,
                        output: format!("{:#}", e),
                        reason: FailureReason::Internal,
                        duration: Duration::default(),
                    },
                },
            }
        }
    }))
    .buffer_unordered(jobs.max(1))
    .collect::<Vec<JobResult>>()
    .await;

    Ok(results)
}
