//! # Trigger Command Module
//!
//! This module implements the `trigger` command: evaluate the declared
//! path patterns against a set of changed paths and report whether the
//! pipeline would run. Exit code 0 means triggered, 1 means skipped.

use anyhow::{bail, Result};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::{config, trigger::PathFilter};
use crate::infra::fs;

/// Executes the trigger command against paths from a file or the
/// command line.
pub fn execute(
    config_path: PathBuf,
    changed_files: Option<PathBuf>,
    paths: Vec<String>,
) -> Result<ExitCode> {
    let config_path = fs::absolute_path(&config_path)?;
    let matrix_config = config::load_matrix_config(&config_path)?;
    let filter = PathFilter::new(&matrix_config.trigger.paths)?;

    let changed = if !paths.is_empty() {
        paths
    } else if let Some(file) = &changed_files {
        fs::read_path_list(file)?
    } else {
        bail!("Provide changed paths as arguments or with --changed-files.");
    };

    match filter.first_match(&changed) {
        Some((path, pattern)) => {
            println!(
                "{}",
                format!(
                    "TRIGGERED: '{}' matches trigger pattern '{}'",
                    path.display(),
                    pattern
                )
                .green()
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!(
                "{}",
                format!(
                    "SKIPPED: none of the {} changed path(s) match a trigger pattern",
                    changed.len()
                )
                .yellow()
            );
            for pattern in filter.patterns() {
                println!("  - {}", pattern.dimmed());
            }
            Ok(ExitCode::from(1))
        }
    }
}
