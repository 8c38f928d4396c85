//! Chart derivation summary

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::{AnyValue, DataFrame};

use crate::pipeline::ChartOutcome;

/// Print one row per chart branch with its shape or its failure.
pub fn display_summary(outcomes: &[ChartOutcome]) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("CHART SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Chart").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("Columns").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
    ]);

    for outcome in outcomes {
        match &outcome.result {
            Ok(spec) => {
                table.add_row(vec![
                    Cell::new(outcome.id),
                    Cell::new(spec.kind),
                    Cell::new(spec.height()),
                    Cell::new(spec.table.width()),
                    Cell::new("✅ ok").fg(Color::Green),
                ]);
            }
            Err(err) => {
                table.add_row(vec![
                    Cell::new(outcome.id),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("❌ {}", err)).fg(Color::Red),
                ]);
            }
        }
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    let failed = failed_count(outcomes);
    if failed > 0 {
        println!();
        println!(
            "    {} {}",
            style("⚠️ ").yellow(),
            style(format!("{} of {} chart(s) failed", failed, outcomes.len())).yellow()
        );
    }
}

/// Number of branches that did not produce a chart.
pub fn failed_count(outcomes: &[ChartOutcome]) -> usize {
    outcomes.iter().filter(|o| o.result.is_err()).count()
}

/// Print the first `rows` rows of every derived table.
pub fn display_preview(outcomes: &[ChartOutcome], rows: usize) {
    for outcome in outcomes {
        if let Ok(spec) = &outcome.result {
            println!();
            println!(
                "    {} {}",
                style(outcome.id).cyan().bold(),
                style(spec.title.as_str()).dim()
            );
            for line in preview_table(&spec.table, rows).to_string().lines() {
                println!("    {}", line);
            }
        }
    }
}

/// Render the head of `df` as a terminal table.
pub fn preview_table(df: &DataFrame, rows: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| Cell::new(name.as_str()).add_attribute(Attribute::Bold)),
    );

    let columns = df.get_columns();
    for i in 0..rows.min(df.height()) {
        let row: Vec<Cell> = columns
            .iter()
            .map(|c| Cell::new(c.get(i).map(cell_text).unwrap_or_default()))
            .collect();
        table.add_row(row);
    }

    table
}

fn cell_text(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format!("{:.2}", v),
        other => other.to_string(),
    }
}
