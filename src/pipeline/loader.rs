//! Dataset loader for CSV and Parquet files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::columns::{
    DEPARTMENT_SUFFIX, ENROLLED, FUNNEL_METRICS, RETENTION_RATE, SATISFACTION, YEAR,
};
use super::error::{PipelineError, PipelineResult};

/// The loaded term records, shared read-only by every chart branch.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    source: PathBuf,
    departments: Vec<String>,
}

impl Dataset {
    /// Wrap an already materialized frame, discovering its department columns.
    pub fn new(frame: DataFrame, source: impl Into<PathBuf>) -> Self {
        let departments = department_columns(&frame);
        Self {
            frame,
            source: source.into(),
            departments,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Department enrollment columns in header order, e.g. `"Arts Enrolled"`.
    pub fn department_columns(&self) -> &[String] {
        &self.departments
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Fail with [`PipelineError::EmptyInput`] when no records were loaded.
    pub fn require_rows(&self) -> PipelineResult<()> {
        if self.is_empty() {
            Err(PipelineError::EmptyInput)
        } else {
            Ok(())
        }
    }

    /// Estimated in-memory size in megabytes
    pub fn estimated_size_mb(&self) -> f64 {
        self.frame.estimated_size() as f64 / (1024.0 * 1024.0)
    }
}

/// Columns named `"<Department> Enrolled"`, excluding the plain `Enrolled` total.
pub fn department_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.as_str())
        .filter(|name| *name != ENROLLED && name.ends_with(DEPARTMENT_SUFFIX))
        .map(str::to_string)
        .collect()
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 scans the whole CSV for type inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let frame = lf
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let frame = if frame.height() == 0 {
        // A header-only CSV infers every column as text
        restore_numeric_types(frame)?
    } else {
        frame
    };

    Ok(Dataset::new(frame, path))
}

/// Cast the known metric columns of a row-less frame back to numbers.
fn restore_numeric_types(frame: DataFrame) -> Result<DataFrame> {
    let mut casts: Vec<Expr> = Vec::new();
    for name in frame.get_column_names() {
        let name = name.as_str();
        let dtype = if name == RETENTION_RATE || name == SATISFACTION {
            DataType::Float64
        } else if name == YEAR || FUNNEL_METRICS.contains(&name) || name.ends_with(DEPARTMENT_SUFFIX) {
            DataType::Int64
        } else {
            continue;
        };
        casts.push(col(name).cast(dtype));
    }

    Ok(frame.lazy().with_columns(casts).collect()?)
}
