//! # Job Execution Engine Module
//!
//! This module runs a single matrix cell through the fixed step sequence:
//! allocate an ephemeral workspace, reclaim disk space, resolve
//! dependencies through the cache, then invoke the external build-and-test
//! script with the cell's two matrix values. The script's exit status is
//! the job's result.

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::core::config::JobSection;
use crate::core::matrix::MatrixCell;
use crate::core::models::{CacheStatus, FailureReason, JobResult};
use crate::infra::cache::{cache_key, DepCache};
use crate::infra::{command, fs};

/// Builds the program and argument list for the external script invocation.
/// The script always receives exactly two positional arguments: the
/// benchmark type token and the fuzzer identifier.
pub fn script_invocation(job: &JobSection, cell: &MatrixCell) -> (String, Vec<String>) {
    let script = job.script.display().to_string();
    let mut args = Vec::with_capacity(3);

    let program = match &job.interpreter {
        Some(interpreter) => {
            args.push(script);
            interpreter.clone()
        }
        None => script,
    };

    args.push(cell.benchmark_type.as_str().to_string());
    args.push(cell.fuzzer.clone());
    (program, args)
}

/// Runs one matrix cell end to end and reports its outcome.
/// Step failures are captured as a `JobResult::Failed`; an `Err` return
/// means the runner itself broke, not the job.
pub async fn run_matrix_job(
    cell: MatrixCell,
    job: &JobSection,
    project_root: &Path,
    cache: &DepCache,
    install_lock: &Mutex<()>,
) -> Result<JobResult> {
    let job_name = cell.job_name();
    let start = Instant::now();

    // Step 1: ephemeral per-job workspace, removed on drop.
    let workspace = fs::create_job_dir(&job_name)
        .with_context(|| format!("Failed to create workspace for job {}", job_name))?;

    // Step 2: disk cleanup.
    match fs::reclaim_disk_space(&job.cleanup_paths) {
        Ok(reclaimed) if reclaimed > 0 => {
            println!(
                "{}",
                format!("[{}] reclaimed {} bytes of disk space", job_name, reclaimed).dimmed()
            );
        }
        Ok(_) => {}
        Err(e) => {
            println!("{}", format!("[{}] disk cleanup failed", job_name).red());
            return Ok(JobResult::Failed {
                cell,
                output: format!("{:#}", e),
                reason: FailureReason::DiskCleanup,
                duration: start.elapsed(),
            });
        }
    }

    // Step 3: dependency cache lookup and, on miss, install.
    let cache_status = match ensure_dependencies(job, project_root, cache, install_lock).await {
        Ok(status) => status,
        Err(e) => {
            println!(
                "{}",
                format!("[{}] dependency install failed", job_name).red()
            );
            return Ok(JobResult::Failed {
                cell,
                output: format!("{:#}", e),
                reason: FailureReason::DependencyInstall,
                duration: start.elapsed(),
            });
        }
    };

    // Step 4: the external build-and-test script.
    println!(
        "{}",
        format!(
            "[{}] building and testing (benchmark_type={}, fuzzer={})",
            job_name, cell.benchmark_type, cell.fuzzer
        )
        .blue()
    );

    let (program, args) = script_invocation(job, &cell);
    let mut cmd = tokio::process::Command::new(&program);
    cmd.args(&args)
        .envs(&job.env)
        .env("MATRIX_WORK_DIR", workspace.path())
        .kill_on_drop(true)
        .current_dir(project_root);

    let (status_res, output) = command::spawn_and_capture(cmd).await;
    let duration = start.elapsed();

    let status = match status_res {
        Ok(status) => status,
        Err(e) => {
            println!(
                "{}",
                format!("[{}] failed to launch '{}': {}", job_name, program, e).red()
            );
            return Ok(JobResult::Failed {
                cell,
                output: format!("Failed to launch '{}': {}", program, e),
                reason: FailureReason::Internal,
                duration,
            });
        }
    };

    if status.success() {
        println!(
            "{}",
            format!("[{}] passed in {:.2}s", job_name, duration.as_secs_f64()).green()
        );
        Ok(JobResult::Passed {
            cell,
            output,
            duration,
            cache: cache_status,
        })
    } else {
        println!(
            "{}",
            format!(
                "[{}] failed with {} after {:.2}s",
                job_name, status, duration.as_secs_f64()
            )
            .red()
        );
        Ok(JobResult::Failed {
            cell,
            output,
            reason: FailureReason::BuildScript,
            duration,
        })
    }
}

/// Looks up the dependency cache and installs on a miss.
///
/// The key is derived from the operating system name and a content hash of
/// the requirements file, so a changed declaration invalidates the entry.
/// Installs from concurrent cells are serialized through `install_lock`;
/// the key is re-checked under the lock so only the first cell installs.
async fn ensure_dependencies(
    job: &JobSection,
    project_root: &Path,
    cache: &DepCache,
    install_lock: &Mutex<()>,
) -> Result<CacheStatus> {
    let Some(requirements) = &job.requirements else {
        return Ok(CacheStatus::Disabled);
    };
    let requirements = if requirements.is_absolute() {
        requirements.clone()
    } else {
        project_root.join(requirements)
    };

    let key = cache_key(&requirements)?;
    if cache.contains(&key) {
        return Ok(CacheStatus::Hit);
    }

    let _guard = install_lock.lock().await;
    if cache.contains(&key) {
        return Ok(CacheStatus::Hit);
    }

    let install = job
        .install_command()
        .context("No install command could be derived")?;
    let (program, args) = command::shell_invocation(&install)?;

    let mut cmd = tokio::process::Command::new(&program);
    cmd.args(&args)
        .envs(&job.env)
        .kill_on_drop(true)
        .current_dir(project_root);

    let (status_res, output) = command::spawn_and_capture(cmd).await;
    let status = status_res
        .with_context(|| format!("Failed to launch install command '{}'", install))?;

    if !status.success() {
        anyhow::bail!("Install command '{}' failed with {}:\n{}", install, status, output);
    }

    cache.record(&key)?;
    Ok(CacheStatus::Installed)
}
