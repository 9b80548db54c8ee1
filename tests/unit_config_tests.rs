//! Unit tests for the `config` module: parsing and validation of the
//! pipeline declaration, including the structural invariants (non-empty
//! enumerations, unique fuzzer identifiers).

use fuzzmatrix::cli::commands::init::default_config;
use fuzzmatrix::core::config::{validate, MatrixConfig};
use fuzzmatrix::core::matrix::BenchmarkType;

fn parse(toml_str: &str) -> MatrixConfig {
    toml::from_str(toml_str).expect("declaration should parse")
}

#[test]
fn test_minimal_declaration() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl"]
        benchmark_types = ["standard"]

        [job]
        script = "build.py"
        "#,
    );

    assert_eq!(config.matrix.fuzzers, vec!["afl"]);
    assert_eq!(config.matrix.benchmark_types, vec![BenchmarkType::Standard]);
    assert!(config.trigger.paths.is_empty());
    assert!(config.job.interpreter.is_none());
    assert!(config.job.requirements.is_none());
    assert!(config.job.env.is_empty());
    assert!(config.job.cleanup_paths.is_empty());
    assert!(validate(&config).is_ok());
}

#[test]
fn test_full_declaration() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl", "libfuzzer"]
        benchmark_types = ["oss-fuzz", "standard", "bug"]

        [trigger]
        paths = ["docker/**", "fuzzers/**", "requirements.txt"]

        [job]
        script = "ci/build.py"
        interpreter = "python3"
        requirements = "requirements.txt"
        install = "python3 -m pip install -r requirements.txt"
        cleanup_paths = ["/opt/hostedtoolcache"]
        cache_dir = ".deps-cache"

        [job.env]
        PYTHONPATH = "."
        "#,
    );

    assert_eq!(config.matrix.fuzzers.len(), 2);
    assert_eq!(
        config.matrix.benchmark_types,
        vec![BenchmarkType::OssFuzz, BenchmarkType::Standard, BenchmarkType::Bug]
    );
    assert_eq!(config.trigger.paths.len(), 3);
    assert_eq!(config.job.interpreter.as_deref(), Some("python3"));
    assert_eq!(config.job.env.get("PYTHONPATH").map(String::as_str), Some("."));
    assert!(validate(&config).is_ok());
}

#[test]
fn test_unknown_benchmark_type_rejected() {
    let result: Result<MatrixConfig, _> = toml::from_str(
        r#"
        [matrix]
        fuzzers = ["afl"]
        benchmark_types = ["coverage"]

        [job]
        script = "build.py"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_duplicate_fuzzer_rejected() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl", "libfuzzer", "afl"]
        benchmark_types = ["standard"]

        [job]
        script = "build.py"
        "#,
    );

    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("Duplicate fuzzer identifier"));
}

#[test]
fn test_empty_fuzzer_list_rejected() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = []
        benchmark_types = ["standard"]

        [job]
        script = "build.py"
        "#,
    );
    assert!(validate(&config).is_err());
}

#[test]
fn test_empty_benchmark_types_rejected() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl"]
        benchmark_types = []

        [job]
        script = "build.py"
        "#,
    );
    assert!(validate(&config).is_err());
}

#[test]
fn test_install_command_derived_from_requirements() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl"]
        benchmark_types = ["standard"]

        [job]
        script = "build.py"
        interpreter = "python3"
        requirements = "requirements.txt"
        "#,
    );

    assert_eq!(
        config.job.install_command().as_deref(),
        Some("python3 -m pip install -r requirements.txt")
    );
}

#[test]
fn test_install_command_absent_without_requirements() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl"]
        benchmark_types = ["standard"]

        [job]
        script = "build.py"
        "#,
    );
    assert!(config.job.install_command().is_none());
}

#[test]
fn test_explicit_install_command_wins() {
    let config = parse(
        r#"
        [matrix]
        fuzzers = ["afl"]
        benchmark_types = ["standard"]

        [job]
        script = "build.py"
        requirements = "requirements.txt"
        install = "make deps"
        "#,
    );
    assert_eq!(config.job.install_command().as_deref(), Some("make deps"));
}

#[test]
fn test_default_declaration_is_valid() {
    let config: MatrixConfig =
        toml::from_str(default_config()).expect("default declaration should parse");
    assert!(validate(&config).is_ok());
    assert_eq!(config.matrix.fuzzers.len(), 60);
    assert_eq!(config.matrix.benchmark_types.len(), 3);
    assert!(!config.trigger.paths.is_empty());
}
