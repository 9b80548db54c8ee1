//! # Matrix Module
//!
//! This module defines the two enumerations that span the job matrix and
//! the cross-product expansion producing one job instance per
//! (fuzzer, benchmark type) pair. Cells are independent and stateless
//! relative to each other; expansion order is deterministic but carries
//! no semantics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of target programs a fuzzer is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkType {
    /// Real-world targets imported from OSS-Fuzz projects.
    OssFuzz,
    /// The standard coverage benchmark set.
    Standard,
    /// Bug-based benchmarks with known, reachable defects.
    Bug,
}

impl BenchmarkType {
    /// All benchmark types, in declaration order.
    pub const ALL: [BenchmarkType; 3] = [
        BenchmarkType::OssFuzz,
        BenchmarkType::Standard,
        BenchmarkType::Bug,
    ];

    /// The wire token passed to the external build script.
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkType::OssFuzz => "oss-fuzz",
            BenchmarkType::Standard => "standard",
            BenchmarkType::Bug => "bug",
        }
    }
}

impl fmt::Display for BenchmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BenchmarkType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oss-fuzz" => Ok(BenchmarkType::OssFuzz),
            "standard" => Ok(BenchmarkType::Standard),
            "bug" => Ok(BenchmarkType::Bug),
            other => anyhow::bail!(
                "Unknown benchmark type '{}' (expected one of: oss-fuzz, standard, bug)",
                other
            ),
        }
    }
}

/// One parameterized instance of the fixed step sequence, bound to one
/// (fuzzer, benchmark type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatrixCell {
    pub fuzzer: String,
    pub benchmark_type: BenchmarkType,
}

impl MatrixCell {
    pub fn new(fuzzer: impl Into<String>, benchmark_type: BenchmarkType) -> Self {
        Self {
            fuzzer: fuzzer.into(),
            benchmark_type,
        }
    }

    /// The display name used in logs and reports, e.g. `standard/afl`.
    pub fn job_name(&self) -> String {
        format!("{}/{}", self.benchmark_type, self.fuzzer)
    }
}

impl fmt::Display for MatrixCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.benchmark_type, self.fuzzer)
    }
}

/// Expands the cross product of the two enumerations, fuzzer-major.
/// The result always holds exactly `fuzzers.len() * types.len()` cells.
pub fn expand(fuzzers: &[String], types: &[BenchmarkType]) -> Vec<MatrixCell> {
    let mut cells = Vec::with_capacity(fuzzers.len() * types.len());
    for fuzzer in fuzzers {
        for ty in types {
            cells.push(MatrixCell::new(fuzzer.clone(), *ty));
        }
    }
    cells
}
