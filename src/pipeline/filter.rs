//! Row selection by categorical membership

use std::collections::BTreeSet;

use polars::prelude::*;

use super::error::{require_columns, PipelineResult};

/// Keep the rows whose `column` value is one of `allowed_values`.
///
/// Values are compared in their string form, so numeric columns can be
/// filtered too (`Year` with `"2021"`). Nulls never match. Row order is
/// preserved and an empty result is not an error.
pub fn select_where<S: AsRef<str>>(
    df: &DataFrame,
    column: &str,
    allowed_values: &[S],
) -> PipelineResult<DataFrame> {
    require_columns(df, "filter", &[column])?;

    let allowed: BTreeSet<&str> = allowed_values.iter().map(|v| v.as_ref()).collect();

    let as_text = df.column(column)?.cast(&DataType::String)?;
    let values = as_text.str()?;
    let mask = BooleanChunked::from_iter_values(
        "mask".into(),
        values
            .into_iter()
            .map(|v| v.is_some_and(|v| allowed.contains(v))),
    );

    Ok(df.filter(&mask)?)
}
