//! Unit tests for the trigger filter: the pipeline must activate when a
//! changed path matches a declared pattern, and must NOT activate for
//! pull requests touching only unrelated paths.

use fuzzmatrix::core::trigger::PathFilter;

fn default_filter() -> PathFilter {
    PathFilter::new(&[
        "docker/**",
        "fuzzers/**",
        "benchmarks/**",
        "src_analysis/**",
        ".github/**",
        "requirements.txt",
    ])
    .unwrap()
}

#[test]
fn test_directory_pattern_matches_nested_paths() {
    let filter = default_filter();
    assert!(filter.matches("docker/base/Dockerfile"));
    assert!(filter.matches("fuzzers/afl/fuzzer.py"));
    assert!(filter.matches("benchmarks/libpng/build.sh"));
    assert!(filter.matches(".github/workflows/fuzzers.yml"));
}

#[test]
fn test_exact_file_pattern() {
    let filter = default_filter();
    assert!(filter.matches("requirements.txt"));
    assert!(!filter.matches("docs/requirements.txt.md"));
}

#[test]
fn test_unrelated_paths_do_not_trigger() {
    let filter = default_filter();
    let changed = vec!["README.md", "docs/index.md", "analysis/queries.py"];
    assert!(!filter.should_trigger(&changed));
}

#[test]
fn test_single_relevant_path_triggers() {
    let filter = default_filter();
    let changed = vec!["README.md", "fuzzers/aflplusplus/builder.Dockerfile"];
    assert!(filter.should_trigger(&changed));

    let (path, pattern) = filter.first_match(&changed).unwrap();
    assert_eq!(path.to_str(), Some("fuzzers/aflplusplus/builder.Dockerfile"));
    assert_eq!(pattern, "fuzzers/**");
}

#[test]
fn test_empty_change_set_never_triggers() {
    let filter = default_filter();
    let changed: Vec<&str> = vec![];
    assert!(!filter.should_trigger(&changed));
    assert!(filter.first_match(&changed).is_none());
}

#[test]
fn test_empty_pattern_set_never_triggers() {
    let filter = PathFilter::new::<&str>(&[]).unwrap();
    assert!(!filter.should_trigger(&["fuzzers/afl/fuzzer.py"]));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let err = PathFilter::new(&["fuzzers/[invalid"]).unwrap_err();
    assert!(err.to_string().contains("Invalid trigger pattern"));
}
