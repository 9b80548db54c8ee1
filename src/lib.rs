//! # Fuzzmatrix Library
//!
//! This library provides the core functionality for the `fuzzmatrix` tool,
//! a configuration-driven CI matrix runner for fuzzer benchmarking pipelines.
//! Given a declaration of fuzzer identifiers, benchmark types and trigger
//! paths, it expands the fuzzer × benchmark-type cross product and drives an
//! external build-and-test script once per matrix cell.
//!
//! ## Modules
//!
//! - `core` - Matrix expansion, trigger filtering, planning and job execution
//! - `infra` - Infrastructure services like command execution, the dependency
//!   cache and file system operations
//! - `reporting` - Matrix result reporting (console, HTML, JSON)
//! - `cli` - Command-line interface and commands

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::matrix;
pub use crate::core::models;
