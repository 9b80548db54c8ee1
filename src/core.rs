//! # Core Module
//!
//! This module contains the core functionality of fuzzmatrix,
//! including the pipeline declaration, matrix expansion, trigger
//! filtering, execution planning and job execution.

pub mod config;
pub mod execution;
pub mod matrix;
pub mod models;
pub mod planner;
pub mod trigger;

// Re-exports
pub use self::config::MatrixConfig;
pub use self::matrix::{BenchmarkType, MatrixCell};
pub use self::models::JobResult;
pub use self::trigger::PathFilter;
