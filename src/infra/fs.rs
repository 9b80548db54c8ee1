//! # File System Operations Module
//!
//! This module provides utilities for file system operations, such as
//! creating the ephemeral per-job workspace and reclaiming disk space
//! before a job runs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a unique, ephemeral workspace directory for a matrix job.
/// The directory is deleted when the returned guard is dropped, so each
/// job gets its own isolated disk area.
pub fn create_job_dir(job_name: &str) -> Result<TempDir> {
    let sanitized = job_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();

    tempfile::Builder::new()
        .prefix(&format!("fuzzmatrix_{}_", sanitized))
        .tempdir()
        .context("Failed to create job workspace directory")
}

/// Removes the configured cleanup paths to free disk space before a job.
/// Missing entries are ignored. Returns the number of bytes reclaimed.
pub fn reclaim_disk_space<P: AsRef<Path>>(paths: &[P]) -> Result<u64> {
    let mut reclaimed = 0u64;
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            continue;
        }
        reclaimed += fs_extra::dir::get_size(path).unwrap_or(0);
        let removal = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match removal {
            Ok(()) => {}
            // Another cell may have removed the same path first.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to remove: {}", path.display()));
            }
        }
    }
    Ok(reclaimed)
}

/// Reads a newline-separated path list, skipping blank lines.
pub fn read_path_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read path list: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Gets the absolute path from a potentially relative path.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
