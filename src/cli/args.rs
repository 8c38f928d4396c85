//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::DeriveOptions;
use crate::report::default_output_dir;

/// campus-metrics - Shape university term metrics into chart-ready tables
#[derive(Parser, Debug)]
#[command(name = "campus-metrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for the chart tables and charts.json manifest.
    /// Defaults to the input directory with a '_charts' suffix (e.g., data.csv → data_charts/).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Term labels kept by the term comparison chart (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["Spring", "Fall"])]
    pub terms: Vec<String>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Derive empty tables from an input without rows instead of failing
    #[arg(long, default_value = "false")]
    pub allow_empty: bool,

    /// Derive the charts one after another instead of in parallel
    #[arg(long, default_value = "false")]
    pub sequential: bool,

    /// Print the first N rows of every derived table (0 disables the preview)
    #[arg(long, default_value = "0")]
    pub preview: usize,

    /// Derive and report only, without writing any files
    #[arg(long, default_value = "false")]
    pub no_export: bool,
}

impl Cli {
    /// Get the output directory, deriving it from the input if not explicitly provided.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.input))
    }

    /// Branch options built from the flags.
    pub fn derive_options(&self) -> DeriveOptions {
        DeriveOptions {
            compare_terms: self.terms.clone(),
            parallel: !self.sequential,
        }
    }
}
