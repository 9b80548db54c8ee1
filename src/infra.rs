//! # Infrastructure Module
//!
//! This module provides infrastructure services for fuzzmatrix,
//! including command execution, the dependency cache and file system
//! operations.

pub mod cache;
pub mod command;
pub mod fs;
