//! Chart branches: one derived table plus its rendering contract per chart
//!
//! Every branch reads only the loaded [`Dataset`] and returns a fresh table,
//! so the branches can run in any order or in parallel.

use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::aggregate::{aggregate, sort_by_keys, AggOp};
use super::columns::*;
use super::combine::{union_aligned, UnionSource};
use super::error::{require_columns, PipelineResult};
use super::filter::select_where;
use super::loader::Dataset;
use super::reshape::melt;

/// How the renderer should read the y columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One row per x value, one column per series.
    Wide,
    /// One row per (x, series) pair, series named by the color column.
    Long,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Wide => write!(f, "wide"),
            ChartKind::Long => write!(f, "long"),
        }
    }
}

/// A finished table and the column names a line chart of it needs.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: String,
    pub kind: ChartKind,
    pub x: String,
    pub y: Vec<String>,
    pub color: Option<String>,
    /// Axis label overrides; `"value"` labels the y axis of multi-series charts.
    pub labels: BTreeMap<String, String>,
    /// Raw series label to display label, for labels that differ.
    pub series_labels: BTreeMap<String, String>,
    pub table: DataFrame,
}

impl ChartSpec {
    /// Check that every column the renderer will look up exists in the table.
    pub fn validate(&self) -> PipelineResult<()> {
        require_columns(&self.table, self.id.as_str(), &[self.x.as_str()])?;
        require_columns(&self.table, self.id.as_str(), &self.y)?;
        if let Some(color) = &self.color {
            require_columns(&self.table, self.id.as_str(), &[color.as_str()])?;
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.table.height()
    }
}

/// Options shared by all branches.
#[derive(Debug, Clone)]
pub struct DeriveOptions {
    /// Term labels kept by the term comparison chart.
    pub compare_terms: Vec<String>,
    /// Evaluate branches on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            compare_terms: vec!["Spring".to_string(), "Fall".to_string()],
            parallel: true,
        }
    }
}

/// Result of one chart branch.
#[derive(Debug)]
pub struct ChartOutcome {
    pub id: ChartId,
    pub result: PipelineResult<ChartSpec>,
}

/// The chart branches, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    TermTotals,
    RetentionTrend,
    YearlySatisfaction,
    DepartmentEnrollment,
    TermComparison,
    CombinedMetrics,
}

impl ChartId {
    pub const ALL: [ChartId; 6] = [
        ChartId::TermTotals,
        ChartId::RetentionTrend,
        ChartId::YearlySatisfaction,
        ChartId::DepartmentEnrollment,
        ChartId::TermComparison,
        ChartId::CombinedMetrics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartId::TermTotals => "term_totals",
            ChartId::RetentionTrend => "retention_trend",
            ChartId::YearlySatisfaction => "yearly_satisfaction",
            ChartId::DepartmentEnrollment => "department_enrollment",
            ChartId::TermComparison => "term_comparison",
            ChartId::CombinedMetrics => "combined_metrics",
        }
    }

    /// Derive this chart's table and validate it against its column contract.
    pub fn derive(self, dataset: &Dataset, options: &DeriveOptions) -> PipelineResult<ChartSpec> {
        let spec = match self {
            ChartId::TermTotals => term_totals(dataset)?,
            ChartId::RetentionTrend => retention_trend(dataset)?,
            ChartId::YearlySatisfaction => yearly_satisfaction(dataset)?,
            ChartId::DepartmentEnrollment => department_enrollment(dataset)?,
            ChartId::TermComparison => term_comparison(dataset, &options.compare_terms)?,
            ChartId::CombinedMetrics => combined_metrics(dataset)?,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Run every branch against `dataset`. A failing branch does not stop the others.
pub fn derive_all(dataset: &Dataset, options: &DeriveOptions) -> Vec<ChartOutcome> {
    let run = |id: &ChartId| ChartOutcome {
        id: *id,
        result: id.derive(dataset, options),
    };

    if options.parallel {
        ChartId::ALL.par_iter().map(run).collect()
    } else {
        ChartId::ALL.iter().map(run).collect()
    }
}

fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn department_labels(dataset: &Dataset) -> BTreeMap<String, String> {
    dataset
        .department_columns()
        .iter()
        .map(|c| (c.clone(), display_label(c).to_string()))
        .filter(|(raw, shown)| raw != shown)
        .collect()
}

/// Known departments must all be present; extra department columns are melted too.
fn department_long(dataset: &Dataset) -> PipelineResult<DataFrame> {
    require_columns(dataset.frame(), "melt", &KNOWN_DEPARTMENT_COLUMNS)?;
    melt(
        dataset.frame(),
        TERM,
        dataset.department_columns(),
        DEPARTMENT,
        ENROLLMENTS,
    )
}

/// Summed applications, admissions and enrollments per term label, years collapsed.
pub fn term_totals(dataset: &Dataset) -> PipelineResult<ChartSpec> {
    let table = aggregate(dataset.frame(), TERM, &FUNNEL_METRICS, AggOp::Sum)?;

    Ok(ChartSpec {
        id: ChartId::TermTotals,
        title: "Total Applications, Admissions, and Enrollments per Term".to_string(),
        kind: ChartKind::Wide,
        x: TERM.to_string(),
        y: FUNNEL_METRICS.iter().map(|s| s.to_string()).collect(),
        color: None,
        labels: labels(&[(TERM, "Term"), ("value", "Count")]),
        series_labels: BTreeMap::new(),
        table,
    })
}

/// Retention rate of every record, in file order.
pub fn retention_trend(dataset: &Dataset) -> PipelineResult<ChartSpec> {
    let df = dataset.frame();
    require_columns(df, "retention_trend", &[TERM, YEAR, RETENTION_RATE])?;
    let table = df.select([TERM, YEAR, RETENTION_RATE])?;

    Ok(ChartSpec {
        id: ChartId::RetentionTrend,
        title: "Retention Rate Trends Over Time".to_string(),
        kind: ChartKind::Wide,
        x: TERM.to_string(),
        y: vec![RETENTION_RATE.to_string()],
        color: None,
        labels: labels(&[(TERM, "Term"), (RETENTION_RATE, RETENTION_RATE)]),
        series_labels: BTreeMap::new(),
        table,
    })
}

/// Mean satisfaction score per year, ascending by year.
pub fn yearly_satisfaction(dataset: &Dataset) -> PipelineResult<ChartSpec> {
    let grouped = aggregate(dataset.frame(), YEAR, &[SATISFACTION], AggOp::Mean)?;
    let table = sort_by_keys(&grouped, &[YEAR])?;

    Ok(ChartSpec {
        id: ChartId::YearlySatisfaction,
        title: "Student Satisfaction Scores Over the Years".to_string(),
        kind: ChartKind::Wide,
        x: YEAR.to_string(),
        y: vec![SATISFACTION.to_string()],
        color: None,
        labels: labels(&[(YEAR, "Year"), (SATISFACTION, SATISFACTION)]),
        series_labels: BTreeMap::new(),
        table,
    })
}

/// Per-department enrollment in long form, one row per (record, department).
pub fn department_enrollment(dataset: &Dataset) -> PipelineResult<ChartSpec> {
    let table = department_long(dataset)?;

    Ok(ChartSpec {
        id: ChartId::DepartmentEnrollment,
        title: "Enrollment Breakdown by Department".to_string(),
        kind: ChartKind::Long,
        x: TERM.to_string(),
        y: vec![ENROLLMENTS.to_string()],
        color: Some(DEPARTMENT.to_string()),
        labels: labels(&[(TERM, "Term"), (ENROLLMENTS, ENROLLMENTS)]),
        series_labels: department_labels(dataset),
        table,
    })
}

/// `"Comparison Between Spring vs. Fall Term Trends"` for the default terms.
fn comparison_title<S: AsRef<str>>(terms: &[S]) -> String {
    if terms.is_empty() {
        return "Term Comparison".to_string();
    }
    let names: Vec<&str> = terms.iter().map(|t| t.as_ref()).collect();
    format!("Comparison Between {} Term Trends", names.join(" vs. "))
}

/// Funnel metrics of the compared terms by year, year-major and term-minor.
pub fn term_comparison<S: AsRef<str>>(
    dataset: &Dataset,
    compare_terms: &[S],
) -> PipelineResult<ChartSpec> {
    let df = dataset.frame();
    let mut wanted = vec![YEAR, TERM];
    wanted.extend(FUNNEL_METRICS);
    require_columns(df, "term_comparison", &wanted)?;

    let selected = select_where(df, TERM, compare_terms)?;
    let table = sort_by_keys(&selected.select(wanted)?, &[YEAR, TERM])?;

    Ok(ChartSpec {
        id: ChartId::TermComparison,
        title: comparison_title(compare_terms),
        kind: ChartKind::Wide,
        x: YEAR.to_string(),
        y: FUNNEL_METRICS.iter().map(|s| s.to_string()).collect(),
        color: Some(TERM.to_string()),
        labels: labels(&[(YEAR, "Year"), ("value", "Count"), (TERM, "Term")]),
        series_labels: BTreeMap::new(),
        table,
    })
}

/// Department enrollments, retention and satisfaction as one long table keyed by term.
pub fn combined_metrics(dataset: &Dataset) -> PipelineResult<ChartSpec> {
    let df = dataset.frame();
    let departments = department_long(dataset)?;

    let sources = [
        UnionSource::tagged(&departments, ENROLLMENTS, DEPARTMENT),
        UnionSource::literal(df, RETENTION_RATE, RETENTION_METRIC),
        UnionSource::literal(df, SATISFACTION, SATISFACTION_METRIC),
    ];
    let table = union_aligned(&sources, TERM, METRIC, VALUE)?;

    Ok(ChartSpec {
        id: ChartId::CombinedMetrics,
        title: "Departmental Enrollment, Retention Rates, and Satisfaction Trends".to_string(),
        kind: ChartKind::Long,
        x: TERM.to_string(),
        y: vec![VALUE.to_string()],
        color: Some(METRIC.to_string()),
        labels: labels(&[(TERM, "Term"), (VALUE, "Percentage/Enrollments")]),
        series_labels: department_labels(dataset),
        table,
    })
}
