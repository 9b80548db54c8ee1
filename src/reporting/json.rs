//! # JSON Reporting Module
//!
//! Machine-readable report for downstream tooling. The shape is stable:
//! a timestamp, aggregate counts and the full per-cell results.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::JobResult;

#[derive(Debug, Serialize)]
struct MatrixReport<'a> {
    generated_at: DateTime<Utc>,
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    jobs: &'a [JobResult],
}

/// Writes the matrix results as pretty-printed JSON.
pub fn write_json_report(results: &[JobResult], output_path: &Path) -> Result<()> {
    let passed = results.iter().filter(|r| r.is_passed()).count();
    let failed = results.iter().filter(|r| r.is_failure()).count();

    let report = MatrixReport {
        generated_at: Utc::now(),
        total: results.len(),
        passed,
        failed,
        skipped: results.len() - passed - failed,
        jobs: results,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))?;
    Ok(())
}
