// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// Creates a throwaway project directory containing a pipeline declaration
/// and a fake build script driven by `sh`, so no real fuzzer toolchain is
/// needed. The script appends its arguments to `invocations.log` and exits
/// with `exit_code`.
pub fn setup_pipeline_project(fuzzers: &[&str], types: &[&str], exit_code: i32) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    let script = format!(
        "#!/bin/sh\necho \"$1 $2\" >> invocations.log\nexit {}\n",
        exit_code
    );
    fs::write(root.join("fake_build.sh"), script).expect("Failed to write fake script");

    let fuzzer_list = fuzzers
        .iter()
        .map(|f| format!("\"{}\"", f))
        .collect::<Vec<_>>()
        .join(", ");
    let type_list = types
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");

    let config = format!(
        r#"[matrix]
fuzzers = [{fuzzer_list}]
benchmark_types = [{type_list}]

[trigger]
paths = ["docker/**", "fuzzers/**", "requirements.txt"]

[job]
script = "fake_build.sh"
interpreter = "sh"
"#
    );
    fs::write(root.join("FuzzMatrix.toml"), config).expect("Failed to write FuzzMatrix.toml");

    temp_dir
}

/// Writes a newline-separated changed-path list next to the project.
pub fn write_changed_files(temp_dir: &TempDir, paths: &[&str]) -> PathBuf {
    let file = temp_dir.path().join("changed.txt");
    fs::write(&file, paths.join("\n")).expect("Failed to write changed-path list");
    file
}
