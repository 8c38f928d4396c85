//! Tests for group-by aggregation and key sorting

use campus_metrics::pipeline::{aggregate, sort_by_keys, AggOp, PipelineError};
use polars::prelude::*;
use std::collections::HashMap;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_sum_by_term_two_records() {
    let df = create_two_term_dataframe();

    let out = aggregate(&df, "Term", &["Applications"], AggOp::Sum).unwrap();

    assert_shape(&out, 2, 2);
    assert_eq!(strings(&out, "Term"), vec!["Fall", "Spring"]);
    assert_eq!(ints(&out, "Applications"), vec![100, 200]);
}

#[test]
fn test_sum_collapses_years() {
    let df = create_multi_year_dataframe();

    let out = aggregate(&df, "Term", &["Applications", "Admitted", "Enrolled"], AggOp::Sum).unwrap();

    // One row per term label regardless of year, in first-appearance order
    assert_eq!(strings(&out, "Term"), vec!["Spring", "Fall", "Summer"]);
    assert_eq!(ints(&out, "Applications"), vec![2500 + 2550 + 2450, 2600 + 2700 + 2400, 300]);
    assert_eq!(ints(&out, "Admitted"), vec![1500 + 1520 + 1480, 1550 + 1600 + 1450, 150]);
    assert_eq!(ints(&out, "Enrolled"), vec![1000 + 1020 + 990, 1050 + 1100 + 950, 100]);
}

#[test]
fn test_sum_matches_manual_grouping_on_random_data() {
    let df = create_random_dataframe(500, 7);

    let out = aggregate(&df, "Term", &["Applications"], AggOp::Sum).unwrap();

    let mut expected: HashMap<String, i64> = HashMap::new();
    for (term, apps) in strings(&df, "Term").into_iter().zip(ints(&df, "Applications")) {
        *expected.entry(term).or_default() += apps;
    }

    let actual: HashMap<String, i64> = strings(&out, "Term")
        .into_iter()
        .zip(ints(&out, "Applications"))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_mean_by_year_uses_only_that_year() {
    let df = create_multi_year_dataframe();

    let out = aggregate(&df, "Year", &["Student Satisfaction (%)"], AggOp::Mean).unwrap();
    let means: HashMap<i64, f64> = ints(&out, "Year")
        .into_iter()
        .zip(floats(&out, "Student Satisfaction (%)"))
        .collect();

    assert_eq!(means.len(), 3);
    assert!((means[&2016] - (78.0 + 80.0 + 70.0) / 3.0).abs() < 1e-9);
    assert!((means[&2017] - (82.0 + 81.0) / 2.0).abs() < 1e-9);
    assert!((means[&2015] - (76.0 + 77.0) / 2.0).abs() < 1e-9);
}

#[test]
fn test_mean_output_is_float() {
    let df = create_two_term_dataframe();
    let out = aggregate(&df, "Term", &["Applications"], AggOp::Mean).unwrap();
    assert_eq!(out.column("Applications").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_missing_metric_is_schema_error() {
    let df = create_two_term_dataframe();

    let err = aggregate(&df, "Term", &["Applications", "Rejected"], AggOp::Sum).unwrap_err();

    match err {
        PipelineError::Schema { step, column, .. } => {
            assert_eq!(step, "aggregate");
            assert_eq!(column, "Rejected");
        }
        other => panic!("expected schema error, got {other}"),
    }
}

#[test]
fn test_missing_group_key_is_schema_error() {
    let df = create_two_term_dataframe();
    let err = aggregate(&df, "Semester", &["Applications"], AggOp::Sum).unwrap_err();
    assert!(err.is_schema());
}

#[test]
fn test_empty_input_yields_empty_table() {
    let df = create_two_term_dataframe().head(Some(0));

    let out = aggregate(&df, "Term", &["Applications"], AggOp::Sum).unwrap();

    assert_eq!(out.height(), 0);
    assert_eq!(column_names(&out), vec!["Term", "Applications"]);
}

#[test]
fn test_aggregate_is_repeatable() {
    let df = create_random_dataframe(200, 11);

    let first = aggregate(&df, "Year", &["Enrolled"], AggOp::Sum).unwrap();
    let second = aggregate(&df, "Year", &["Enrolled"], AggOp::Sum).unwrap();

    assert!(first.equals(&second));
}

#[test]
fn test_sort_year_major_term_minor() {
    let df = create_multi_year_dataframe();

    let out = sort_by_keys(&df, &["Year", "Term"]).unwrap();

    assert_eq!(ints(&out, "Year"), vec![2015, 2015, 2016, 2016, 2016, 2017, 2017]);
    assert_eq!(
        strings(&out, "Term"),
        vec!["Fall", "Spring", "Fall", "Spring", "Summer", "Fall", "Spring"]
    );
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let df = df! {
        "Year" => [2020i64, 2020, 2019, 2020],
        "Applications" => [1i64, 2, 3, 4],
    }
    .unwrap();

    let out = sort_by_keys(&df, &["Year"]).unwrap();

    assert_eq!(ints(&out, "Applications"), vec![3, 1, 2, 4]);
}

#[test]
fn test_sort_missing_key_is_schema_error() {
    let df = create_two_term_dataframe();
    assert!(sort_by_keys(&df, &["Quarter"]).unwrap_err().is_schema());
}
