//! # Configuration Module
//!
//! This module defines the pipeline declaration loaded from `FuzzMatrix.toml`:
//! the fuzzer and benchmark-type enumerations that span the matrix, the glob
//! patterns that gate pipeline activation, and the parameters of the fixed
//! step sequence every matrix cell runs.

use crate::core::matrix::BenchmarkType;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// The entire pipeline declaration, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatrixConfig {
    /// The two enumerations whose cross product forms the job matrix.
    pub matrix: MatrixSection,
    /// The path patterns that decide whether the pipeline runs at all.
    #[serde(default)]
    pub trigger: TriggerSection,
    /// Parameters of the per-cell step sequence.
    pub job: JobSection,
}

/// The `[matrix]` section: the fuzzer and benchmark-type enumerations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatrixSection {
    /// The fixed set of fuzzer identifiers. Uniqueness is required;
    /// order does not affect semantics.
    pub fuzzers: Vec<String>,
    /// The benchmark-type categories each fuzzer is evaluated against.
    pub benchmark_types: Vec<BenchmarkType>,
}

/// The `[trigger]` section: a set of glob patterns matched against the
/// changed paths of a pull request. The set is fixed at load time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TriggerSection {
    #[serde(default)]
    pub paths: Vec<String>,
}

/// The `[job]` section: everything a single matrix cell needs beyond its
/// two matrix values. The step sequence itself is fixed; only these
/// parameters vary between pipelines.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobSection {
    /// Path to the external build-and-test program, relative to the
    /// project root. It receives exactly two positional arguments:
    /// the benchmark type and the fuzzer identifier.
    pub script: PathBuf,
    /// Optional interpreter to run the script under (e.g. `python3`).
    /// When absent the script is executed directly.
    #[serde(default)]
    pub interpreter: Option<String>,
    /// Environment variables exported to every job step.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// The dependency declaration file whose content hash keys the
    /// dependency cache. No cache is used when absent.
    #[serde(default)]
    pub requirements: Option<PathBuf>,
    /// Custom dependency install command. Defaults to
    /// `<interpreter> -m pip install -r <requirements>` when a
    /// requirements file is declared.
    #[serde(default)]
    pub install: Option<String>,
    /// Paths removed before each job to reclaim disk space. Missing
    /// entries are ignored.
    #[serde(default)]
    pub cleanup_paths: Vec<PathBuf>,
    /// Directory holding dependency cache stamps. Defaults to
    /// `.fuzzmatrix-cache` under the project root.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl JobSection {
    /// Resolves the install command for this pipeline, deriving the
    /// conventional pip invocation when none is declared.
    pub fn install_command(&self) -> Option<String> {
        if let Some(cmd) = &self.install {
            return Some(cmd.clone());
        }
        self.requirements.as_ref().map(|req| {
            let interpreter = self.interpreter.as_deref().unwrap_or("python3");
            format!("{} -m pip install -r {}", interpreter, req.display())
        })
    }

    /// The cache directory, resolved against the project root.
    pub fn cache_root(&self, project_root: &Path) -> PathBuf {
        match &self.cache_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_root.join(dir),
            None => project_root.join(".fuzzmatrix-cache"),
        }
    }
}

/// Loads and validates a pipeline declaration from the given path.
pub fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: MatrixConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    validate(&config)?;
    Ok(config)
}

/// Checks the structural invariants of a declaration: non-empty
/// enumerations and unique fuzzer identifiers.
pub fn validate(config: &MatrixConfig) -> Result<()> {
    if config.matrix.fuzzers.is_empty() {
        bail!("The [matrix] section must declare at least one fuzzer.");
    }
    if config.matrix.benchmark_types.is_empty() {
        bail!("The [matrix] section must declare at least one benchmark type.");
    }

    let mut seen = HashSet::new();
    for fuzzer in &config.matrix.fuzzers {
        if fuzzer.trim().is_empty() {
            bail!("Fuzzer identifiers must not be empty.");
        }
        if !seen.insert(fuzzer.as_str()) {
            bail!("Duplicate fuzzer identifier in [matrix].fuzzers: '{}'", fuzzer);
        }
    }

    if config.job.script.as_os_str().is_empty() {
        bail!("The [job] section must declare a build script.");
    }

    Ok(())
}
