//! campus-metrics: Chart Table CLI
//!
//! Loads term records and writes one chart-ready table per dashboard chart.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use campus_metrics::cli::Cli;
use campus_metrics::pipeline::{derive_all, load_dataset};
use campus_metrics::report::{display_preview, display_summary, export_charts, failed_count};
use campus_metrics::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.derive_options();
    let output_dir = (!cli.no_export).then(|| cli.output_dir());

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        output_dir.as_deref(),
        &options.compare_terms,
        options.parallel,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading term records...");
    let dataset = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", dataset.height());
    println!("      Columns: {}", dataset.frame().width());
    println!(
        "      Departments: {}",
        dataset.department_columns().join(", ")
    );
    println!("      Estimated memory: {:.2} MB", dataset.estimated_size_mb());

    if let Err(err) = dataset.require_rows() {
        if !cli.allow_empty {
            return Err(err.into());
        }
        print_warning("Input has no rows; every chart table will be empty");
    }
    print_info(&format!("Loaded in {:.2?}", step_start.elapsed()));

    // Step 2: Derive chart tables
    print_step_header(2, "Derive Chart Tables");
    let step_start = Instant::now();
    let spinner = create_spinner("Deriving chart tables...");
    let outcomes = derive_all(&dataset, &options);
    let failed = failed_count(&outcomes);
    if failed == 0 {
        finish_with_success(&spinner, &format!("{} chart table(s) derived", outcomes.len()));
    } else {
        finish_with_warning(
            &spinner,
            &format!("{} of {} chart table(s) failed", failed, outcomes.len()),
        );
    }
    print_info(&format!("Derived in {:.2?}", step_start.elapsed()));

    display_summary(&outcomes);
    if cli.preview > 0 {
        display_preview(&outcomes, cli.preview);
    }

    // Step 3: Export
    if let Some(output_dir) = &output_dir {
        print_step_header(3, "Save Results");
        let spinner = create_spinner("Writing chart tables...");
        let manifest = export_charts(&dataset, &outcomes, output_dir)?;
        finish_with_success(&spinner, &format!("Saved to {}", output_dir.display()));
        print_success(&format!("Manifest written to {}", manifest.display()));
    }

    if failed > 0 {
        let schema_failures = outcomes
            .iter()
            .filter(|o| matches!(&o.result, Err(e) if e.is_schema()))
            .count();
        anyhow::bail!(
            "{} chart(s) failed ({} with missing or mistyped columns)",
            failed,
            schema_failures
        );
    }

    print_completion();

    Ok(())
}
