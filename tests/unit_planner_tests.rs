//! Unit tests for the execution planner: cross-product size, filtering
//! and sharding across CI runners.

use fuzzmatrix::core::config::MatrixConfig;
use fuzzmatrix::core::matrix::BenchmarkType;
use fuzzmatrix::core::planner::plan_matrix;

fn three_by_three() -> MatrixConfig {
    toml::from_str(
        r#"
        [matrix]
        fuzzers = ["afl", "libfuzzer", "honggfuzz"]
        benchmark_types = ["oss-fuzz", "standard", "bug"]

        [job]
        script = "build.py"
        "#,
    )
    .unwrap()
}

#[test]
fn test_plan_covers_full_cross_product() {
    let plan = plan_matrix(&three_by_three(), None, None, None, None).unwrap();
    assert_eq!(plan.total_cells, 9);
    assert_eq!(plan.cells_to_run.len(), 9);
    assert_eq!(plan.filtered_count, 0);
    assert!(!plan.is_distributed);
}

#[test]
fn test_fuzzer_filter() {
    let plan = plan_matrix(&three_by_three(), Some("afl"), None, None, None).unwrap();
    assert_eq!(plan.cells_to_run.len(), 3);
    assert!(plan.cells_to_run.iter().all(|c| c.fuzzer == "afl"));
    assert_eq!(plan.filtered_count, 6);
}

#[test]
fn test_unknown_fuzzer_filter_is_rejected() {
    let err = plan_matrix(&three_by_three(), Some("neuzz"), None, None, None).unwrap_err();
    assert!(err.to_string().contains("Unknown fuzzer"));
}

#[test]
fn test_benchmark_type_filter() {
    let plan =
        plan_matrix(&three_by_three(), None, Some(BenchmarkType::Bug), None, None).unwrap();
    assert_eq!(plan.cells_to_run.len(), 3);
    assert!(plan
        .cells_to_run
        .iter()
        .all(|c| c.benchmark_type == BenchmarkType::Bug));
}

#[test]
fn test_undeclared_benchmark_type_filter_is_rejected() {
    let config: MatrixConfig = toml::from_str(
        r#"
        [matrix]
        fuzzers = ["afl", "libfuzzer"]
        benchmark_types = ["oss-fuzz", "standard"]

        [job]
        script = "build.py"
        "#,
    )
    .unwrap();
    let err = plan_matrix(&config, None, Some(BenchmarkType::Bug), None, None).unwrap_err();
    assert!(err
        .to_string()
        .contains("not declared in [matrix].benchmark_types"));
}

#[test]
fn test_sharding_partitions_the_matrix() {
    let config = three_by_three();
    let mut seen = Vec::new();
    for index in 0..2 {
        let plan = plan_matrix(&config, None, None, Some(2), Some(index)).unwrap();
        assert!(plan.is_distributed);
        seen.extend(plan.cells_to_run);
    }
    // Every cell lands on exactly one runner.
    assert_eq!(seen.len(), 9);
    let full = plan_matrix(&config, None, None, None, None).unwrap().cells_to_run;
    for cell in full {
        assert_eq!(seen.iter().filter(|c| **c == cell).count(), 1);
    }
}

#[test]
fn test_sharding_rejects_out_of_range_index() {
    let err = plan_matrix(&three_by_three(), None, None, Some(2), Some(2)).unwrap_err();
    assert!(err.to_string().contains("less than total"));
}

#[test]
fn test_sharding_requires_both_flags() {
    assert!(plan_matrix(&three_by_three(), None, None, Some(2), None).is_err());
    assert!(plan_matrix(&three_by_three(), None, None, None, Some(0)).is_err());
}

#[test]
fn test_sharding_rejects_zero_runners() {
    assert!(plan_matrix(&three_by_three(), None, None, Some(0), Some(0)).is_err());
}
