//! # Init Command Module
//!
//! This module implements the `init` command, which writes a
//! `FuzzMatrix.toml` pipeline declaration. The default carries the full
//! fuzzer enumeration and the conventional trigger paths of a fuzzer
//! benchmarking repository; the interactive wizard only asks for the
//! handful of values that differ between projects.

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input};
use once_cell::sync::Lazy;
use std::fmt::Write as _;
use std::{fs, path::PathBuf};

/// The fixed fuzzer enumeration shipped with the default declaration.
pub const DEFAULT_FUZZERS: [&str; 60] = [
    "afl",
    "afl_collision_free",
    "afl_no_favored",
    "afl_qemu",
    "aflcc",
    "aflfast",
    "aflfast_no_favored",
    "aflplusplus",
    "aflplusplus_classic",
    "aflplusplus_cmplog",
    "aflplusplus_frida",
    "aflplusplus_lto",
    "aflplusplus_mopt",
    "aflplusplus_optimal",
    "aflplusplus_optimal_shmem",
    "aflplusplus_qemu",
    "aflplusplus_shmem",
    "aflplusplus_um_prioritize",
    "aflplusplus_um_random",
    "aflsmart",
    "centipede",
    "eclipser",
    "entropic",
    "entropic_execute_final",
    "entropic_keepseed",
    "entropic_magicbytes",
    "fairfuzz",
    "fuzzolic_aflplusplus_fuzzolic",
    "fuzzolic_aflplusplus_z3",
    "honggfuzz",
    "honggfuzz_qemu",
    "klee",
    "lafintel",
    "libafl",
    "libfuzzer",
    "libfuzzer_dataflow",
    "libfuzzer_dataflow_load",
    "libfuzzer_dataflow_pre",
    "libfuzzer_dataflow_store",
    "libfuzzer_execute_final",
    "libfuzzer_fixcrashes",
    "libfuzzer_interceptors",
    "libfuzzer_keepseed",
    "libfuzzer_magicbytes",
    "libfuzzer_norestart",
    "manul",
    "mopt",
    "neuzz",
    "pythia_bb",
    "pythia_effect_bb",
    "qsym",
    "radamsa",
    "symcc_afl",
    "symcc_afl_single",
    "symcc_aflplusplus",
    "symcc_aflplusplus_single",
    "symqemu_aflplusplus",
    "tortoisefuzz",
    "weizz",
    "wingfuzz",
];

/// Trigger paths of the conventional repository layout: the pipeline
/// only runs for changes under these prefixes or to these files.
const DEFAULT_TRIGGER_PATHS: [&str; 6] = [
    "docker/**",
    "fuzzers/**",
    "benchmarks/**",
    "src_analysis/**",
    ".github/**",
    "requirements.txt",
];

static DEFAULT_CONFIG: Lazy<String> = Lazy::new(|| {
    render_config(
        "ci/build_and_test_run_fuzzer_benchmarks.py",
        "python3",
        "requirements.txt",
        true,
    )
});

/// The default pipeline declaration text.
pub fn default_config() -> &'static str {
    &DEFAULT_CONFIG
}

/// Renders a pipeline declaration with the given project-specific values.
fn render_config(script: &str, interpreter: &str, requirements: &str, include_bug: bool) -> String {
    let mut out = String::new();
    out.push_str("# Fuzzer benchmark matrix pipeline declaration.\n");
    out.push_str("# One build-and-test job runs per (fuzzer, benchmark_type) pair.\n\n");

    out.push_str("[matrix]\n");
    out.push_str("fuzzers = [\n");
    for fuzzer in DEFAULT_FUZZERS {
        let _ = writeln!(out, "    \"{}\",", fuzzer);
    }
    out.push_str("]\n");
    if include_bug {
        out.push_str("benchmark_types = [\"oss-fuzz\", \"standard\", \"bug\"]\n\n");
    } else {
        out.push_str("benchmark_types = [\"oss-fuzz\", \"standard\"]\n\n");
    }

    out.push_str("# The pipeline only runs when a changed path matches one of these patterns.\n");
    out.push_str("[trigger]\n");
    out.push_str("paths = [\n");
    for pattern in DEFAULT_TRIGGER_PATHS {
        let _ = writeln!(out, "    \"{}\",", pattern);
    }
    out.push_str("]\n\n");

    out.push_str("# Parameters of the per-cell job steps. The script receives exactly two\n");
    out.push_str("# positional arguments: the benchmark type and the fuzzer identifier.\n");
    out.push_str("[job]\n");
    let _ = writeln!(out, "script = \"{}\"", script);
    let _ = writeln!(out, "interpreter = \"{}\"", interpreter);
    let _ = writeln!(out, "requirements = \"{}\"", requirements);
    out.push_str("cleanup_paths = []\n\n");
    out.push_str("[job.env]\n");
    out.push_str("PYTHONPATH = \".\"\n");

    out
}

/// Executes the init command.
pub fn execute(output: PathBuf, force: bool, non_interactive: bool) -> Result<()> {
    if output.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                format!("'{}' already exists. Use --force to overwrite.", output.display()).red()
            );
            return Ok(());
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("'{}' already exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    let content = if non_interactive {
        default_config().to_string()
    } else {
        let script: String = Input::new()
            .with_prompt("Build-and-test script path")
            .default("ci/build_and_test_run_fuzzer_benchmarks.py".to_string())
            .interact_text()?;
        let interpreter: String = Input::new()
            .with_prompt("Interpreter")
            .default("python3".to_string())
            .interact_text()?;
        let requirements: String = Input::new()
            .with_prompt("Dependency declaration file (cache key input)")
            .default("requirements.txt".to_string())
            .interact_text()?;
        let include_bug = Confirm::new()
            .with_prompt("Include the bug-based benchmark type?")
            .default(true)
            .interact()?;
        render_config(&script, &interpreter, &requirements, include_bug)
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(&output, content)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    println!(
        "{}",
        format!("Created pipeline declaration at '{}'.", output.display()).green()
    );
    println!("Next: review the fuzzer list, then run 'fuzzmatrix run'.");
    Ok(())
}
