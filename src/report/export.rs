//! Chart table and manifest export

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::{ChartKind, ChartOutcome, ChartSpec, Dataset};

/// File name of the manifest written next to the chart tables.
pub const MANIFEST_FILE: &str = "charts.json";

/// Metadata about the derivation run
#[derive(Debug, Serialize)]
pub struct ManifestMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub tool_version: String,
    pub input_file: String,
    pub input_rows: usize,
    /// Department enrollment columns found in the input
    pub departments: Vec<String>,
}

/// One chart entry in the manifest.
#[derive(Debug, Serialize)]
pub struct ManifestChart {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub series_labels: BTreeMap<String, String>,
    /// Table file name relative to the manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ManifestChart {
    fn from_spec(spec: &ChartSpec, table_file: String) -> Self {
        Self {
            id: spec.id.to_string(),
            title: Some(spec.title.clone()),
            kind: Some(spec.kind),
            x: Some(spec.x.clone()),
            y: spec.y.clone(),
            color: spec.color.clone(),
            labels: spec.labels.clone(),
            series_labels: spec.series_labels.clone(),
            table: Some(table_file),
            rows: Some(spec.height()),
            error: None,
        }
    }

    fn failed(id: String, error: String) -> Self {
        Self {
            id,
            title: None,
            kind: None,
            x: None,
            y: Vec::new(),
            color: None,
            labels: BTreeMap::new(),
            series_labels: BTreeMap::new(),
            table: None,
            rows: None,
            error: Some(error),
        }
    }
}

/// Everything the chart renderer needs to locate and draw each table.
#[derive(Debug, Serialize)]
pub struct ChartManifest {
    pub metadata: ManifestMetadata,
    pub charts: Vec<ManifestChart>,
}

/// Default output directory: `<input dir>/<input stem>_charts`.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    parent.join(format!("{}_charts", stem))
}

/// Write each successful chart table as `<id>.csv` plus the `charts.json` manifest.
///
/// Returns the manifest path.
pub fn export_charts(
    dataset: &Dataset,
    outcomes: &[ChartOutcome],
    output_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let mut charts = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match &outcome.result {
            Ok(spec) => {
                let file_name = format!("{}.csv", spec.id);
                write_table(&spec.table, &output_dir.join(&file_name))?;
                charts.push(ManifestChart::from_spec(spec, file_name));
            }
            Err(err) => {
                charts.push(ManifestChart::failed(outcome.id.to_string(), err.to_string()));
            }
        }
    }

    let manifest = ChartManifest {
        metadata: ManifestMetadata {
            timestamp: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: dataset.source().display().to_string(),
            input_rows: dataset.height(),
            departments: dataset.department_columns().to_vec(),
        },
        charts,
    };

    let manifest_path = output_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest)
        .context("Failed to serialize chart manifest to JSON")?;
    std::fs::write(&manifest_path, json).with_context(|| {
        format!("Failed to write chart manifest to {}", manifest_path.display())
    })?;

    Ok(manifest_path)
}

fn write_table(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    // CsvWriter needs a mutable frame
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
