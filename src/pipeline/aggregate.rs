//! Group-by aggregation of metric columns

use std::fmt;

use polars::prelude::*;

use super::error::{require_columns, PipelineResult};

/// Reduction applied to each metric column within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    Sum,
    Mean,
}

impl fmt::Display for AggOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggOp::Sum => write!(f, "sum"),
            AggOp::Mean => write!(f, "mean"),
        }
    }
}

impl AggOp {
    fn apply(self, column: &str) -> Expr {
        match self {
            AggOp::Sum => col(column).sum(),
            AggOp::Mean => col(column).mean(),
        }
    }
}

/// Collapse `df` to one row per distinct value of `group_key`.
///
/// Each column in `metrics` is reduced with `op` over every row sharing the key
/// and keeps its own name. Groups appear in order of first appearance. Sums
/// keep the column's numeric type; means are `f64`.
pub fn aggregate<S: AsRef<str>>(
    df: &DataFrame,
    group_key: &str,
    metrics: &[S],
    op: AggOp,
) -> PipelineResult<DataFrame> {
    require_columns(df, "aggregate", &[group_key])?;
    require_columns(df, "aggregate", metrics)?;

    let exprs: Vec<Expr> = metrics.iter().map(|m| op.apply(m.as_ref())).collect();

    let out = df
        .clone()
        .lazy()
        .group_by_stable([col(group_key)])
        .agg(exprs)
        .collect()?;

    Ok(out)
}

/// Stable ascending sort on several key columns, first key most significant.
pub fn sort_by_keys<S: AsRef<str>>(df: &DataFrame, keys: &[S]) -> PipelineResult<DataFrame> {
    require_columns(df, "sort", keys)?;

    let by: Vec<PlSmallStr> = keys.iter().map(|k| k.as_ref().into()).collect();
    let sorted = df.sort(by, SortMultipleOptions::default().with_maintain_order(true))?;
    Ok(sorted)
}
