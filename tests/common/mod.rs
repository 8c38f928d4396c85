//! Shared test utilities and fixture generators

#![allow(dead_code)]

use campus_metrics::pipeline::Dataset;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

pub const DEPARTMENTS: [&str; 4] = [
    "Engineering Enrolled",
    "Business Enrolled",
    "Arts Enrolled",
    "Science Enrolled",
];

/// The two-record scenario: one Fall 2020 row and one Spring 2021 row.
pub fn create_two_term_dataframe() -> DataFrame {
    df! {
        "Term" => ["Fall", "Spring"],
        "Year" => [2020i64, 2021],
        "Applications" => [100i64, 200],
        "Admitted" => [50i64, 100],
        "Enrolled" => [40i64, 80],
        "Retention Rate (%)" => [90.0f64, 95.0],
        "Student Satisfaction (%)" => [80.0f64, 85.0],
        "Engineering Enrolled" => [10i64, 20],
        "Business Enrolled" => [10i64, 20],
        "Arts Enrolled" => [10i64, 20],
        "Science Enrolled" => [10i64, 20],
    }
    .unwrap()
}

/// Three years of Spring and Fall records plus one Summer record.
///
/// Rows are deliberately not in (Year, Term) order.
pub fn create_multi_year_dataframe() -> DataFrame {
    df! {
        "Term" => ["Spring", "Fall", "Summer", "Fall", "Spring", "Fall", "Spring"],
        "Year" => [2016i64, 2016, 2016, 2017, 2017, 2015, 2015],
        "Applications" => [2500i64, 2600, 300, 2700, 2550, 2400, 2450],
        "Admitted" => [1500i64, 1550, 150, 1600, 1520, 1450, 1480],
        "Enrolled" => [1000i64, 1050, 100, 1100, 1020, 950, 990],
        "Retention Rate (%)" => [85.0f64, 86.0, 80.0, 87.0, 86.5, 84.0, 84.5],
        "Student Satisfaction (%)" => [78.0f64, 80.0, 70.0, 82.0, 81.0, 76.0, 77.0],
        "Engineering Enrolled" => [300i64, 310, 30, 330, 305, 280, 290],
        "Business Enrolled" => [250i64, 260, 25, 270, 255, 240, 245],
        "Arts Enrolled" => [200i64, 210, 20, 220, 205, 190, 195],
        "Science Enrolled" => [250i64, 270, 25, 280, 255, 240, 260],
    }
    .unwrap()
}

/// Random records with `rows` rows; term and year drawn from small pools.
pub fn create_random_dataframe(rows: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let terms = ["Spring", "Fall", "Summer", "Winter"];

    let term: Vec<&str> = (0..rows).map(|_| terms[rng.gen_range(0..terms.len())]).collect();
    let year: Vec<i64> = (0..rows).map(|_| rng.gen_range(2015..2025)).collect();
    let mut columns = vec![
        Column::new("Term".into(), term),
        Column::new("Year".into(), year),
    ];
    for name in ["Applications", "Admitted", "Enrolled"] {
        let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..5000)).collect();
        columns.push(Column::new(name.into(), values));
    }
    for name in ["Retention Rate (%)", "Student Satisfaction (%)"] {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.0..100.0)).collect();
        columns.push(Column::new(name.into(), values));
    }
    for name in DEPARTMENTS {
        let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..1000)).collect();
        columns.push(Column::new(name.into(), values));
    }

    DataFrame::new(columns).unwrap()
}

pub fn dataset(df: DataFrame) -> Dataset {
    Dataset::new(df, "test_data.csv")
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Column names of `df` as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Values of a string column
pub fn strings(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

/// Values of an integer column
pub fn ints(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Values of a numeric column as f64
pub fn floats(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}
