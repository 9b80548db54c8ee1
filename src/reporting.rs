//! # Reporting Module
//!
//! This module handles the generation and display of matrix results in
//! multiple formats: a colored console summary, a styled HTML report and
//! a machine-readable JSON report.

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use self::console::{print_failure_details, print_summary};
pub use self::html::generate_html_report;
pub use self::json::write_json_report;
