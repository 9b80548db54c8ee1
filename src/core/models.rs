//! # Data Models Module
//!
//! This module defines the core data structures used throughout the
//! matrix runner: job outcomes, failure reasons and the per-step result
//! of the dependency cache lookup.

use crate::core::matrix::MatrixCell;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Enumerates the step at which a matrix job failed.
/// Any step failing fails the whole job instance; there are no retries.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailureReason {
    /// The disk-cleanup step could not remove a configured path.
    DiskCleanup,
    /// The dependency install command exited with a nonzero status.
    DependencyInstall,
    /// The external build-and-test script exited with a nonzero status.
    BuildScript,
    /// The runner itself failed (spawn error, panicked task, ...).
    Internal,
}

impl FailureReason {
    pub fn describe(&self) -> &'static str {
        match self {
            FailureReason::DiskCleanup => "Disk Cleanup Failure",
            FailureReason::DependencyInstall => "Dependency Install Failure",
            FailureReason::BuildScript => "Build Script Failure",
            FailureReason::Internal => "Internal Runner Failure",
        }
    }
}

/// Outcome of the dependency cache lookup step.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum CacheStatus {
    /// The cache held an entry for the current key; install was skipped.
    Hit,
    /// No entry existed; the install command ran and the key was recorded.
    Installed,
    /// The pipeline declares no requirements file, so no cache is used.
    Disabled,
}

/// The final result of a single matrix job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JobResult {
    /// The external script exited with status 0.
    Passed {
        cell: MatrixCell,
        output: String,
        duration: Duration,
        cache: CacheStatus,
    },
    /// A job step failed. `fail-fast` is off, so this never cancels the
    /// other cells of the matrix.
    Failed {
        cell: MatrixCell,
        output: String,
        reason: FailureReason,
        duration: Duration,
    },
    /// The job never ran (the run was cancelled before its turn).
    Skipped { cell: MatrixCell },
}

impl JobResult {
    pub fn cell(&self) -> &MatrixCell {
        match self {
            JobResult::Passed { cell, .. } => cell,
            JobResult::Failed { cell, .. } => cell,
            JobResult::Skipped { cell } => cell,
        }
    }

    /// The job's display name, e.g. `standard/afl`.
    pub fn job_name(&self) -> String {
        self.cell().job_name()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, JobResult::Failed { .. })
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, JobResult::Passed { .. })
    }

    /// The status label used by the console and HTML reporters.
    pub fn status_str(&self) -> &'static str {
        match self {
            JobResult::Passed { .. } => "Passed",
            JobResult::Failed { .. } => "Failed",
            JobResult::Skipped { .. } => "Skipped",
        }
    }

    /// The CSS class used by the HTML reporter.
    pub fn status_class(&self) -> &'static str {
        match self {
            JobResult::Passed { .. } => "status-passed",
            JobResult::Failed { .. } => "status-failed",
            JobResult::Skipped { .. } => "status-skipped",
        }
    }

    /// The captured output of the job, empty for skipped jobs.
    pub fn output(&self) -> &str {
        match self {
            JobResult::Passed { output, .. } => output,
            JobResult::Failed { output, .. } => output,
            JobResult::Skipped { .. } => "",
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            JobResult::Passed { duration, .. } => Some(*duration),
            JobResult::Failed { duration, .. } => Some(*duration),
            JobResult::Skipped { .. } => None,
        }
    }

    /// Whether the dependency cache served this job.
    pub fn cache_hit(&self) -> bool {
        matches!(
            self,
            JobResult::Passed {
                cache: CacheStatus::Hit,
                ..
            }
        )
    }
}
