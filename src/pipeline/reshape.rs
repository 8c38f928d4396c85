//! Wide-to-long reshaping

use polars::prelude::*;

use super::error::{require_columns, PipelineResult};

/// Unpivot `value_columns` into `(id, category, value)` rows.
///
/// One block of `df.height()` rows is emitted per value column, in the order
/// given, so the output has `df.height() * value_columns.len()` rows. The
/// category cell holds the raw column label. When the value columns do not
/// share a type their values are cast to `f64`.
pub fn melt<S: AsRef<str>>(
    df: &DataFrame,
    id_column: &str,
    value_columns: &[S],
    category_name: &str,
    value_name: &str,
) -> PipelineResult<DataFrame> {
    require_columns(df, "melt", &[id_column])?;
    require_columns(df, "melt", value_columns)?;

    let id = df.column(id_column)?;
    let value_dtype = common_dtype(df, value_columns)?;

    if value_columns.is_empty() {
        return Ok(DataFrame::new(vec![
            Column::new_empty(id_column.into(), id.dtype()),
            Column::new_empty(category_name.into(), &DataType::String),
            Column::new_empty(value_name.into(), &value_dtype),
        ])?);
    }

    let height = df.height();
    let mut out: Option<DataFrame> = None;

    for label in value_columns {
        let label = label.as_ref();
        let category = Column::new(category_name.into(), vec![label; height]);
        let values = df
            .column(label)?
            .cast(&value_dtype)?
            .with_name(value_name.into());

        let block = DataFrame::new(vec![id.clone(), category, values])?;
        match out.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&block)?;
            }
            None => out = Some(block),
        }
    }

    let mut out = out.unwrap_or_default();
    out.as_single_chunk_par();
    Ok(out)
}

/// The shared dtype of `columns`, or `Float64` when they differ.
fn common_dtype<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> PipelineResult<DataType> {
    let mut dtype: Option<DataType> = None;
    for name in columns {
        let current = df.column(name.as_ref())?.dtype();
        match &dtype {
            None => dtype = Some(current.clone()),
            Some(seen) if seen == current => {}
            Some(_) => return Ok(DataType::Float64),
        }
    }
    Ok(dtype.unwrap_or(DataType::Float64))
}
