//! # HTML Reporting Module
//!
//! This module renders the matrix results as a single self-contained HTML
//! file with summary statistics and a per-cell results table, mirroring a
//! CI runner's "show all matrix results" view.

use anyhow::{Context, Result};
use chrono::Utc;
use maud::{html, Markup, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::core::models::JobResult;

const REPORT_STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #24292e; }\
h1 { border-bottom: 1px solid #e1e4e8; padding-bottom: 0.3em; }\
.generated { color: #6a737d; font-size: 0.9em; }\
.summary-container { display: flex; gap: 1.5em; margin: 1.5em 0; }\
.summary-item { text-align: center; padding: 0.8em 1.4em; border: 1px solid #e1e4e8; border-radius: 6px; }\
.summary-item .count { display: block; font-size: 1.8em; font-weight: bold; }\
.passed-text { color: #22863a; }\
.failed-text { color: #cb2431; }\
.skipped-text { color: #6a737d; }\
table { border-collapse: collapse; width: 100%; }\
th, td { border: 1px solid #e1e4e8; padding: 0.5em 0.8em; text-align: left; }\
th { background: #f6f8fa; }\
.status-passed { color: #22863a; font-weight: bold; }\
.status-failed { color: #cb2431; font-weight: bold; }\
.status-skipped { color: #6a737d; }\
pre.output-content { background: #f6f8fa; padding: 0.8em; overflow-x: auto; max-height: 24em; }";

/// Generates a self-contained HTML report from the matrix results.
pub fn generate_html_report(results: &[JobResult], output_path: &Path) -> Result<()> {
    let markup = render_report(results);
    fs::write(output_path, markup.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    Ok(())
}

fn render_report(results: &[JobResult]) -> Markup {
    let total = results.len();
    let passed = results.iter().filter(|r| r.is_passed()).count();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let skipped = total - passed - failed;

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Fuzzer Matrix Report" }
                style { (maud::PreEscaped(REPORT_STYLE)) }
            }
            body {
                h1 { "Fuzzer Matrix Report" }
                p class="generated" {
                    "Generated at " (Utc::now().to_rfc3339())
                }
                div class="summary-container" {
                    div class="summary-item" {
                        span class="count" { (total) }
                        span class="label" { "Total" }
                    }
                    div class="summary-item" {
                        span class="count passed-text" { (passed) }
                        span class="label" { "Passed" }
                    }
                    div class="summary-item" {
                        span class="count failed-text" { (failed) }
                        span class="label" { "Failed" }
                    }
                    div class="summary-item" {
                        span class="count skipped-text" { (skipped) }
                        span class="label" { "Skipped" }
                    }
                }
                table {
                    thead {
                        tr {
                            th { "Job" }
                            th { "Status" }
                            th { "Duration" }
                            th { "Dependency Cache" }
                        }
                    }
                    tbody {
                        @for result in results {
                            (render_row(result))
                        }
                    }
                }
            }
        }
    }
}

fn render_row(result: &JobResult) -> Markup {
    let duration_str = result
        .duration()
        .map(|d| format!("{:.2}s", d.as_secs_f64()))
        .unwrap_or_else(|| "N/A".to_string());

    let status_str = match result {
        JobResult::Failed { reason, .. } => {
            format!("{} ({})", result.status_str(), reason.describe())
        }
        _ => result.status_str().to_string(),
    };

    let cache_str = match result {
        JobResult::Passed { cache, .. } => format!("{:?}", cache),
        _ => String::new(),
    };

    html! {
        tr {
            td { (result.job_name()) }
            td class=(result.status_class()) { (status_str) }
            td { (duration_str) }
            td { (cache_str) }
        }
        @if result.is_failure() && !result.output().trim().is_empty() {
            tr {
                td colspan="4" {
                    pre class="output-content" { (result.output().trim_end()) }
                }
            }
        }
    }
}
