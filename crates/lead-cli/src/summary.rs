use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lead_normalize::{NormalizeReport, Rule, StepOutcome};

use crate::types::ProcessResult;

pub fn print_summary(result: &ProcessResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!(
        "Rows: {}  Columns: {} -> {}",
        result.report.rows, result.report.columns_in, result.report.columns_out
    );
    println!("{}", summary_table(&result.report));
}

/// Per-rule outcome table with a total row.
pub fn summary_table(report: &NormalizeReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Status"),
        header_cell("Changed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, step) in report.steps.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(step.rule.display_name()),
            status_cell(step.outcome),
            changed_cell(step.outcome),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{}/{}", report.applied_count(), report.steps.len()))
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_changed()).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Rule listing for the `rules` command.
pub fn rules_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in Rule::ALL.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(rule.display_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(rule.description()),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(outcome: StepOutcome) -> Cell {
    match outcome {
        StepOutcome::Applied { .. } => Cell::new("applied").fg(Color::Green),
        StepOutcome::Skipped => dim_cell("skipped"),
    }
}

fn changed_cell(outcome: StepOutcome) -> Cell {
    match outcome {
        StepOutcome::Applied { changed } if changed > 0 => Cell::new(changed)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        StepOutcome::Applied { changed } => dim_cell(changed),
        StepOutcome::Skipped => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
