//! Vertical union of derived tables under a shared key and discriminant

use polars::prelude::*;

use super::error::{require_columns, PipelineError, PipelineResult};

/// Where the discriminant value of a source's rows comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discriminant {
    /// Same label on every row, assigned by the caller (e.g. `"Retention Rate"`).
    Literal(String),
    /// Label already carried by the source in the named column.
    Column(String),
}

/// One input of [`union_aligned`].
///
/// The value column is always named explicitly, never inferred from position.
#[derive(Debug, Clone)]
pub struct UnionSource<'a> {
    pub frame: &'a DataFrame,
    pub value_column: String,
    pub discriminant: Discriminant,
}

impl<'a> UnionSource<'a> {
    /// A source whose rows are all tagged with `label`.
    pub fn literal(frame: &'a DataFrame, value_column: &str, label: &str) -> Self {
        Self {
            frame,
            value_column: value_column.to_string(),
            discriminant: Discriminant::Literal(label.to_string()),
        }
    }

    /// A source that already carries its labels in `discriminant_column`.
    pub fn tagged(frame: &'a DataFrame, value_column: &str, discriminant_column: &str) -> Self {
        Self {
            frame,
            value_column: value_column.to_string(),
            discriminant: Discriminant::Column(discriminant_column.to_string()),
        }
    }
}

/// Concatenate `sources` into one `[key_column, discriminant_column, value_name]` table.
///
/// Rows keep their source order and sources keep the order given; nothing is
/// joined, filtered or deduplicated, so the output height is the sum of the
/// input heights. Values are cast to `f64`. Every source must carry
/// `key_column` with the same type.
///
/// With no sources there is no key type to copy, so the empty result has a
/// `String` key column.
pub fn union_aligned(
    sources: &[UnionSource<'_>],
    key_column: &str,
    discriminant_column: &str,
    value_name: &str,
) -> PipelineResult<DataFrame> {
    let mut key_dtype: Option<DataType> = None;
    let mut blocks = Vec::with_capacity(sources.len());

    for source in sources {
        let frame = source.frame;
        require_columns(frame, "union", &[key_column, source.value_column.as_str()])?;

        let key = frame.column(key_column)?;
        match &key_dtype {
            None => key_dtype = Some(key.dtype().clone()),
            Some(expected) if expected != key.dtype() => {
                return Err(PipelineError::TypeMismatch {
                    step: "union",
                    column: key_column.to_string(),
                    expected: expected.to_string(),
                    found: key.dtype().to_string(),
                });
            }
            Some(_) => {}
        }

        let label = match &source.discriminant {
            Discriminant::Literal(label) => {
                Column::new(discriminant_column.into(), vec![label.as_str(); frame.height()])
            }
            Discriminant::Column(name) => {
                require_columns(frame, "union", &[name.as_str()])?;
                frame
                    .column(name)?
                    .cast(&DataType::String)?
                    .with_name(discriminant_column.into())
            }
        };

        let values = frame
            .column(&source.value_column)?
            .cast(&DataType::Float64)?
            .with_name(value_name.into());

        blocks.push(DataFrame::new(vec![
            key.clone().with_name(key_column.into()),
            label,
            values,
        ])?);
    }

    let mut blocks = blocks.into_iter();
    let mut out = match blocks.next() {
        Some(first) => first,
        None => {
            return Ok(DataFrame::new(vec![
                Column::new_empty(key_column.into(), &DataType::String),
                Column::new_empty(discriminant_column.into(), &DataType::String),
                Column::new_empty(value_name.into(), &DataType::Float64),
            ])?)
        }
    };
    for block in blocks {
        out.vstack_mut(&block)?;
    }
    out.as_single_chunk_par();

    Ok(out)
}
