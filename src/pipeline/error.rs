//! Error types for the derivation steps.
//!
//! Every derivation returns `PipelineError` so that a failed chart branch can
//! report the step and the column that broke it without aborting the others.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while deriving chart tables from the loaded dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A column required by a derivation step is not present in its input.
    #[error("{step}: column '{column}' not found. Available columns: {available:?}")]
    Schema {
        /// Derivation step that needed the column (e.g. `aggregate`)
        step: &'static str,
        /// Name of the missing column
        column: String,
        /// Columns that were present in the input
        available: Vec<String>,
    },

    /// Two inputs disagree on the type of a shared column.
    #[error("{step}: column '{column}' has type {found} but {expected} was expected")]
    TypeMismatch {
        step: &'static str,
        column: String,
        expected: String,
        found: String,
    },

    /// The loaded dataset has zero rows.
    #[error("Input dataset has no rows")]
    EmptyInput,

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    /// Whether this error comes from a missing or mistyped column.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            PipelineError::Schema { .. } | PipelineError::TypeMismatch { .. }
        )
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fail with [`PipelineError::Schema`] unless every name in `columns` exists in `df`.
pub fn require_columns<S: AsRef<str>>(
    df: &polars::prelude::DataFrame,
    step: &'static str,
    columns: &[S],
) -> PipelineResult<()> {
    for column in columns {
        let column = column.as_ref();
        if df.get_column_index(column).is_none() {
            return Err(PipelineError::Schema {
                step,
                column: column.to_string(),
                available: df
                    .get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            });
        }
    }
    Ok(())
}
